//! Save and map directory listing
//!
//! A Minecraft installation keeps one directory per world under `saves/`,
//! and each world keeps its map items as `data/map_<n>.dat`. Listing reads
//! only the summary of each map so large worlds list quickly.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, Result as DecodeResult};
use crate::record::{self, MapRecord, UNKNOWN};

/// Name of the per-world directory holding map files
pub const DATA_DIR: &str = "data";

/// Source of directory listings
pub trait DirectoryLister {
    /// Immediate subdirectories of `path`
    fn subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Regular files directly inside `path`
    fn files(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// [`DirectoryLister`] backed by the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl FsLister {
    fn entries(path: &Path, want_dirs: bool) -> io::Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(path)? {
            let path = entry?.path();
            // Follow symlinks so linked worlds show up
            if path.is_dir() == want_dirs && (want_dirs || path.is_file()) {
                out.push(path);
            }
        }
        Ok(out)
    }
}

impl DirectoryLister for FsLister {
    fn subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        Self::entries(path, true)
    }

    fn files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        Self::entries(path, false)
    }
}

/// Order of catalog entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending map id
    #[default]
    MapId,
    /// Ascending level (scale), unknown levels first, then by map id
    Level,
}

/// Listing information for one map file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub path: PathBuf,
    /// File name for display
    pub name: String,
    /// Number from the file name, 0 if it has none
    pub map_id: u32,
    /// Scale, or [`UNKNOWN`] if the file could not be summarized
    pub level: i32,
    pub x_center: i32,
    pub z_center: i32,
}

impl CatalogEntry {
    /// Whether the summary of this file could be read
    pub fn has_level(&self) -> bool {
        self.level != UNKNOWN
    }

    /// Fully decode the map this entry points at
    pub fn load(&self) -> DecodeResult<MapRecord> {
        record::load_map(&self.path)
    }
}

/// Fully decode the map a catalog entry points at
pub fn load_map_entry(entry: &CatalogEntry) -> DecodeResult<MapRecord> {
    entry.load()
}

/// Whether a file name looks like `map_<digits>.<ext>`, ignoring case
pub fn is_map_file_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    let Some(rest) = lower.strip_prefix("map_") else {
        return false;
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return false;
    }
    // A dot and at least one character of extension
    rest[digits..].strip_prefix('.').is_some_and(|ext| !ext.is_empty())
}

/// The first run of ASCII digits in a file name as a number.
///
/// Names without digits, or with a number too large for `u32`, get id 0.
pub fn parse_map_id(name: &str) -> u32 {
    let Some(start) = name.find(|c: char| c.is_ascii_digit()) else {
        return 0;
    };
    let digits: &str = name[start..]
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or_default();
    digits.parse().unwrap_or_else(|_| {
        log::debug!("Map id in '{name}' does not fit u32, using 0");
        0
    })
}

#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    name: String,
    map_id: u32,
}

impl Candidate {
    fn summarize(&self) -> CatalogEntry {
        let (level, x_center, z_center) = match record::load_summary(&self.path) {
            Ok(summary) => (summary.scale, summary.x_center, summary.z_center),
            Err(e) => {
                log::warn!("Could not read {}: {e}", self.path.display());
                (UNKNOWN, UNKNOWN, UNKNOWN)
            }
        };
        CatalogEntry {
            path: self.path.clone(),
            name: self.name.clone(),
            map_id: self.map_id,
            level,
            x_center,
            z_center,
        }
    }
}

/// The map files of one directory
#[derive(Debug, Clone)]
pub struct MapCatalog {
    dir: PathBuf,
    // Sorted by map id, then name
    candidates: Vec<Candidate>,
}

impl MapCatalog {
    /// List map files in `dir` using the file system
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Self, CatalogError> {
        Self::scan_with(&FsLister, dir)
    }

    /// List map files in `dir` through a custom lister.
    ///
    /// Files whose names do not match `map_<digits>.<ext>` are skipped.
    pub fn scan_with<L, P>(lister: &L, dir: P) -> Result<Self, CatalogError>
    where
        L: DirectoryLister + ?Sized,
        P: AsRef<Path>,
    {
        let dir = dir.as_ref().to_path_buf();
        let files = lister.files(&dir).map_err(|source| CatalogError::Listing {
            path: dir.clone(),
            source,
        })?;

        let mut candidates: Vec<Candidate> = files
            .into_iter()
            .filter_map(|path| {
                let name = path.file_name()?.to_string_lossy().into_owned();
                if !is_map_file_name(&name) {
                    log::trace!("Skipping {name}");
                    return None;
                }
                let map_id = parse_map_id(&name);
                Some(Candidate { path, name, map_id })
            })
            .collect();
        candidates.sort_by(|a, b| a.map_id.cmp(&b.map_id).then_with(|| a.name.cmp(&b.name)));

        log::debug!("Found {} map files in {}", candidates.len(), dir.display());
        Ok(Self { dir, candidates })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Paths of the map files in map id order, without reading them
    pub fn paths(&self) -> impl ExactSizeIterator<Item = &Path> + '_ {
        self.candidates.iter().map(|c| c.path.as_path())
    }

    /// Entries in the requested order.
    ///
    /// Files are summarized as the iterator advances; ordering by level has
    /// to summarize every file before yielding the first entry. Each call
    /// reads the files again.
    pub fn entries(&self, order: SortOrder) -> Entries<'_> {
        let inner = match order {
            SortOrder::MapId => EntriesInner::Lazy(self.candidates.iter()),
            SortOrder::Level => {
                let mut all: Vec<CatalogEntry> =
                    self.candidates.iter().map(Candidate::summarize).collect();
                sort_entries(&mut all, SortOrder::Level);
                EntriesInner::Sorted(all.into_iter())
            }
        };
        Entries { inner }
    }
}

/// Iterator returned by [`MapCatalog::entries`]
pub struct Entries<'a> {
    inner: EntriesInner<'a>,
}

enum EntriesInner<'a> {
    Lazy(std::slice::Iter<'a, Candidate>),
    Sorted(std::vec::IntoIter<CatalogEntry>),
}

impl Iterator for Entries<'_> {
    type Item = CatalogEntry;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            EntriesInner::Lazy(it) => it.next().map(Candidate::summarize),
            EntriesInner::Sorted(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            EntriesInner::Lazy(it) => it.size_hint(),
            EntriesInner::Sorted(it) => it.size_hint(),
        }
    }
}

impl ExactSizeIterator for Entries<'_> {}

/// Sort entries in place; the sort is stable
pub fn sort_entries(entries: &mut [CatalogEntry], order: SortOrder) {
    match order {
        SortOrder::MapId => entries.sort_by_key(|e| e.map_id),
        SortOrder::Level => entries.sort_by_key(|e| (e.level, e.map_id)),
    }
}

/// Catalog the map files of a directory in one call
pub fn list_maps<P: AsRef<Path>>(dir: P, order: SortOrder) -> Result<Vec<CatalogEntry>, CatalogError> {
    Ok(MapCatalog::scan(dir)?.entries(order).collect())
}

/// One world under the saves directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDir {
    pub name: String,
    pub path: PathBuf,
}

impl GameDir {
    /// Directory holding this world's map files
    pub fn data_dir(&self) -> PathBuf {
        self.path.join(DATA_DIR)
    }

    /// Catalog of this world's maps
    pub fn catalog(&self) -> Result<MapCatalog, CatalogError> {
        MapCatalog::scan(self.data_dir())
    }

    /// This world's maps in the requested order
    pub fn list_maps(&self, order: SortOrder) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(self.catalog()?.entries(order).collect())
    }
}

/// Worlds in a saves directory, sorted by name
pub fn list_games<P: AsRef<Path>>(saves_dir: P) -> Result<Vec<GameDir>, CatalogError> {
    list_games_with(&FsLister, saves_dir)
}

/// [`list_games`] through a custom lister
pub fn list_games_with<L, P>(lister: &L, saves_dir: P) -> Result<Vec<GameDir>, CatalogError>
where
    L: DirectoryLister + ?Sized,
    P: AsRef<Path>,
{
    let saves_dir = saves_dir.as_ref();
    let dirs = lister
        .subdirectories(saves_dir)
        .map_err(|source| CatalogError::Listing {
            path: saves_dir.to_path_buf(),
            source,
        })?;

    let mut games: Vec<GameDir> = dirs
        .into_iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            Some(GameDir { name, path })
        })
        .collect();
    games.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(games)
}

/// The platform's default Minecraft saves directory
pub fn default_saves_dir() -> Result<PathBuf, CatalogError> {
    let dirs = directories::BaseDirs::new().ok_or(CatalogError::NoSavesDirectory)?;
    let game_dir = if cfg!(target_os = "windows") {
        // %APPDATA%\.minecraft
        dirs.config_dir().join(".minecraft")
    } else if cfg!(target_os = "macos") {
        dirs.data_dir().join("minecraft")
    } else {
        dirs.home_dir().join(".minecraft")
    };
    Ok(game_dir.join("saves"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("map_7.dat", true)]
    #[test_case("MAP_12.DAT", true)]
    #[test_case("map_007.dat_old", true)]
    #[test_case("map_.dat", false)]
    #[test_case("map_7", false)]
    #[test_case("map_7.", false)]
    #[test_case("notamap.dat", false)]
    #[test_case("idcounts.dat", false)]
    #[test_case("old_map_3.dat", false)]
    fn test_is_map_file_name(name: &str, expected: bool) {
        assert_eq!(is_map_file_name(name), expected);
    }

    #[test_case("map_7.dat", 7)]
    #[test_case("map_007.dat", 7)]
    #[test_case("map_123.dat", 123)]
    #[test_case("notamap.dat", 0)]
    #[test_case("map_99999999999.dat", 0 ; "overflow falls back to zero")]
    fn test_parse_map_id(name: &str, expected: u32) {
        assert_eq!(parse_map_id(name), expected);
    }

    fn entry(map_id: u32, level: i32) -> CatalogEntry {
        CatalogEntry {
            path: PathBuf::from(format!("map_{map_id}.dat")),
            name: format!("map_{map_id}.dat"),
            map_id,
            level,
            x_center: 0,
            z_center: 0,
        }
    }

    #[test]
    fn test_sort_orders_differ() {
        let mut entries = vec![entry(2, 1), entry(1, 3)];

        sort_entries(&mut entries, SortOrder::MapId);
        assert_eq!(entries.iter().map(|e| e.map_id).collect::<Vec<_>>(), [1, 2]);

        sort_entries(&mut entries, SortOrder::Level);
        assert_eq!(entries.iter().map(|e| e.map_id).collect::<Vec<_>>(), [2, 1]);
    }

    #[test]
    fn test_unknown_level_sorts_first() {
        let mut entries = vec![entry(1, 0), entry(2, UNKNOWN), entry(3, 0)];
        sort_entries(&mut entries, SortOrder::Level);
        assert_eq!(entries.iter().map(|e| e.map_id).collect::<Vec<_>>(), [2, 1, 3]);
    }

    struct FakeLister {
        dirs: Vec<PathBuf>,
        files: Vec<PathBuf>,
    }

    impl DirectoryLister for FakeLister {
        fn subdirectories(&self, _: &Path) -> io::Result<Vec<PathBuf>> {
            Ok(self.dirs.clone())
        }

        fn files(&self, _: &Path) -> io::Result<Vec<PathBuf>> {
            Ok(self.files.clone())
        }
    }

    struct FailingLister;

    impl DirectoryLister for FailingLister {
        fn subdirectories(&self, _: &Path) -> io::Result<Vec<PathBuf>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn files(&self, _: &Path) -> io::Result<Vec<PathBuf>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn test_scan_filters_and_orders_by_id() {
        let lister = FakeLister {
            dirs: Vec::new(),
            files: ["map_10.dat", "idcounts.dat", "map_2.dat", "raids.dat", "Map_1.DAT"]
                .iter()
                .map(|n| Path::new("/nowhere/data").join(n))
                .collect(),
        };
        let catalog = MapCatalog::scan_with(&lister, "/nowhere/data").unwrap();
        assert_eq!(catalog.len(), 3);

        // The files do not exist, so every summary is unknown
        let entries: Vec<CatalogEntry> = catalog.entries(SortOrder::MapId).collect();
        assert_eq!(entries.iter().map(|e| e.map_id).collect::<Vec<_>>(), [1, 2, 10]);
        assert!(entries.iter().all(|e| !e.has_level()));
        assert_eq!(entries[0].name, "Map_1.DAT");
    }

    #[test]
    fn test_paths_in_id_order() {
        let lister = FakeLister {
            dirs: Vec::new(),
            files: ["map_10.dat", "notes.txt", "map_3.dat"]
                .iter()
                .map(|n| Path::new("/nowhere").join(n))
                .collect(),
        };
        let catalog = MapCatalog::scan_with(&lister, "/nowhere").unwrap();
        let paths: Vec<&Path> = catalog.paths().collect();
        assert_eq!(
            paths,
            [Path::new("/nowhere/map_3.dat"), Path::new("/nowhere/map_10.dat")]
        );
    }

    #[test]
    fn test_entries_are_restartable() {
        let lister = FakeLister {
            dirs: Vec::new(),
            files: vec![PathBuf::from("/nowhere/map_3.dat")],
        };
        let catalog = MapCatalog::scan_with(&lister, "/nowhere").unwrap();
        let first: Vec<_> = catalog.entries(SortOrder::MapId).collect();
        let second: Vec<_> = catalog.entries(SortOrder::MapId).collect();
        assert_eq!(first, second);
        assert_eq!(catalog.entries(SortOrder::Level).len(), 1);
    }

    #[test]
    fn test_listing_failure_is_reported_once() {
        let err = MapCatalog::scan_with(&FailingLister, "/locked").unwrap_err();
        assert!(matches!(err, CatalogError::Listing { ref path, .. } if path == Path::new("/locked")));

        let err = list_games_with(&FailingLister, "/locked").unwrap_err();
        assert!(matches!(err, CatalogError::Listing { .. }));
    }

    #[test]
    fn test_list_games_sorted_by_name() {
        let lister = FakeLister {
            dirs: vec![PathBuf::from("/saves/Zeta"), PathBuf::from("/saves/Alpha")],
            files: Vec::new(),
        };
        let games = list_games_with(&lister, "/saves").unwrap();
        assert_eq!(
            games.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(),
            ["Alpha", "Zeta"]
        );
        assert_eq!(games[0].data_dir(), PathBuf::from("/saves/Alpha/data"));
    }

    #[test]
    fn test_default_saves_dir_ends_with_saves() {
        if let Ok(dir) = default_saves_dir() {
            assert!(dir.ends_with("saves"));
        }
    }
}
