use crate::TileCoord;

/// Square neighbourhood of tiles around an origin, inclusive of the origin.
///
/// Yields `(2r+1)^2` tiles, x-major. Clone it to iterate again.
#[derive(Debug, Clone)]
pub struct TileGrid {
    origin: TileCoord,
    radius: i32,
    dx: i32,
    dy: i32,
}

/// Returns every tile within Chebyshev distance `radius` of `origin`.
pub fn tile_grid(origin: TileCoord, radius: u32) -> TileGrid {
    let radius = i32::try_from(radius).unwrap_or(i32::MAX / 2);
    TileGrid {
        origin,
        radius,
        dx: -radius,
        dy: -radius,
    }
}

impl TileGrid {
    pub fn origin(&self) -> TileCoord {
        self.origin
    }

    fn remaining(&self) -> usize {
        if self.dx > self.radius {
            return 0;
        }
        let side = i64::from(self.radius) * 2 + 1;
        let full_columns_left = i64::from(self.radius - self.dx);
        let in_column = i64::from(self.radius - self.dy) + 1;
        usize::try_from(full_columns_left * side + in_column).unwrap_or(usize::MAX)
    }
}

impl Iterator for TileGrid {
    type Item = TileCoord;

    fn next(&mut self) -> Option<TileCoord> {
        if self.dx > self.radius {
            return None;
        }
        let tile = self.origin.offset(self.dx, self.dy);
        self.dy += 1;
        if self.dy > self.radius {
            self.dy = -self.radius;
            self.dx += 1;
        }
        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileGrid {}
