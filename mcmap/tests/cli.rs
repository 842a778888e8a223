//! CLI integration tests
//!
//! These run the mcmap binary against a temporary saves directory.

use assert_cmd::Command;
use mcmap_map::MapRecord;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_map(dir: &Path, name: &str, record: &MapRecord) {
    let bytes = mcmap_nbt::to_gzip_bytes(&record.to_nbt()).unwrap();
    fs::write(dir.join(name), bytes).unwrap();
}

/// saves/World/data with two maps and one unreadable file
fn create_saves() -> TempDir {
    let saves = TempDir::new().unwrap();
    let data = saves.path().join("World").join("data");
    fs::create_dir_all(&data).unwrap();
    fs::create_dir_all(saves.path().join("Empty")).unwrap();

    write_map(
        &data,
        "map_2.dat",
        &MapRecord::new(1, 0, 2, 2, 64, -64, vec![4, 5, 6, 7]),
    );
    write_map(
        &data,
        "map_1.dat",
        &MapRecord::new(3, -1, 2, 2, 0, 0, vec![4, 4, 4, 200]),
    );
    fs::write(data.join("map_5.dat"), b"garbage").unwrap();
    saves
}

fn mcmap() -> Command {
    let mut cmd = Command::cargo_bin("mcmap").unwrap();
    cmd.env_remove("MCMAP_SAVES_DIR");
    cmd
}

#[test]
fn test_games_lists_worlds() {
    let saves = create_saves();
    mcmap()
        .args(["games", "--saves-dir"])
        .arg(saves.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Empty").and(predicate::str::contains("World")));
}

#[test]
fn test_saves_dir_from_environment() {
    let saves = create_saves();
    mcmap()
        .env("MCMAP_SAVES_DIR", saves.path())
        .arg("games")
        .assert()
        .success()
        .stdout(predicate::str::contains("World"));
}

#[test]
fn test_maps_sorted_by_level() {
    let saves = create_saves();
    let output = mcmap()
        .args(["maps", "World", "--sort", "level", "--saves-dir"])
        .arg(saves.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let pos = |name: &str| stdout.find(name).unwrap();
    // Unreadable first, then level 1, then level 3
    assert!(pos("map_5.dat") < pos("map_2.dat"));
    assert!(pos("map_2.dat") < pos("map_1.dat"));
    assert!(stdout.contains("64,-64"));
}

#[test]
fn test_maps_unknown_world_fails() {
    let saves = create_saves();
    mcmap()
        .args(["maps", "Nope", "--saves-dir"])
        .arg(saves.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No world named 'Nope'"));
}

#[test]
fn test_info_shows_borders_and_colors() {
    let saves = create_saves();
    mcmap()
        .arg("info")
        .arg(saves.path().join("World/data/map_2.dat"))
        .arg("--colors")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Top left: 66,-62")
                .and(predicate::str::contains("Grass"))
                .and(predicate::str::contains("100.0%")),
        );
}

#[test]
fn test_render_writes_png() {
    let saves = create_saves();
    let out = saves.path().join("out.png");
    mcmap()
        .arg("render")
        .arg(saves.path().join("World/data/map_2.dat"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let image = image::open(&out).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (2, 2));
    assert_eq!(image.get_pixel(0, 0).0, [88, 124, 39, 255]);
}

#[test]
fn test_render_defaults_to_working_directory() {
    let saves = create_saves();
    let work = TempDir::new().unwrap();
    mcmap()
        .current_dir(work.path())
        .arg("render")
        .arg(saves.path().join("World/data/map_2.dat"))
        .assert()
        .success();
    assert!(work.path().join("map_2.png").exists());
}

#[test]
fn test_render_bad_palette_index_fails() {
    let saves = create_saves();
    mcmap()
        .arg("render")
        .arg(saves.path().join("World/data/map_1.dat"))
        .arg("-o")
        .arg(saves.path().join("bad.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Color index 200"));
}

#[test]
fn test_export_continues_past_failures() {
    let saves = create_saves();
    let out = saves.path().join("export");
    mcmap()
        .args(["export", "World", "--saves-dir"])
        .arg(saves.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 maps could not be rendered"));

    assert!(out.join("map_2.png").exists());
    assert!(!out.join("map_1.png").exists());
    assert!(!out.join("map_5.png").exists());
}

#[test]
fn test_tree_respects_depth() {
    let saves = create_saves();
    mcmap()
        .arg("tree")
        .arg(saves.path().join("World/data/map_2.dat"))
        .args(["--depth", "1", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("data: TAG_Compound").and(predicate::str::contains("xCenter").not()));
}

#[test]
fn test_completions() {
    mcmap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mcmap"));
}
