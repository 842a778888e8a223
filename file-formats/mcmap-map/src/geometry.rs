//! World-space footprint of a map

use std::fmt;

use crate::record::MapRecord;

/// A world position on the horizontal plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Corner {
    pub x: i64,
    pub z: i64,
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.z)
    }
}

/// The four corners of a map in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderSet {
    pub top_left: Corner,
    pub top_right: Corner,
    pub bottom_left: Corner,
    pub bottom_right: Corner,
}

/// Corners of the area a map covers.
///
/// Height spans the x axis and width the z axis, which is how the map item
/// is oriented in game. Each pixel is taken to cover `scale + 1` blocks.
pub fn borders(record: &MapRecord) -> BorderSet {
    borders_from(
        record.scale(),
        record.x_center(),
        record.z_center(),
        record.width(),
        record.height(),
    )
}

/// [`borders`] on raw values
pub fn borders_from(scale: u8, x_center: i32, z_center: i32, width: i32, height: i32) -> BorderSet {
    let stride = i64::from(scale) + 1;
    let half_x = stride * i64::from(height) / 2;
    let half_z = stride * i64::from(width) / 2;

    let top = i64::from(x_center) + half_x;
    let bottom = i64::from(x_center) - half_x;
    let left = i64::from(z_center) + half_z;
    let right = i64::from(z_center) - half_z;

    BorderSet {
        top_left: Corner { x: top, z: left },
        top_right: Corner { x: top, z: right },
        bottom_left: Corner { x: bottom, z: left },
        bottom_right: Corner { x: bottom, z: right },
    }
}
