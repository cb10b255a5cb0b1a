use crate::core::config::LayoutConfig;
use crate::core::error::{LayoutError, Result};

/// Usable interior of a card face, inset from the frame by fixed margins.
///
/// Pattern offsets are expressed relative to the box's top-left corner; the
/// box translates them into canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintableBox {
    pub width: u32,
    pub height: u32,
    pub margin_left: u32,
    pub margin_top: u32,
}

impl PrintableBox {
    pub fn new(
        canvas_width: u32,
        canvas_height: u32,
        margin_horizontal: u32,
        margin_vertical: u32,
    ) -> Result<Self> {
        let width = i64::from(canvas_width) - 2 * i64::from(margin_horizontal);
        let height = i64::from(canvas_height) - 2 * i64::from(margin_vertical);
        if width <= 0 || height <= 0 {
            return Err(LayoutError::Configuration(format!(
                "printable box {}x{} is empty: canvas {}x{} with margins {}/{}",
                width, height, canvas_width, canvas_height, margin_horizontal, margin_vertical
            )));
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
            margin_left: margin_horizontal,
            margin_top: margin_vertical,
        })
    }

    pub fn for_canvas(canvas_width: u32, canvas_height: u32, config: &LayoutConfig) -> Result<Self> {
        Self::new(
            canvas_width,
            canvas_height,
            config.frame_horizontal_margin,
            config.frame_vertical_margin,
        )
    }

    /// Translate a box-local offset to canvas pixels, rounding down.
    pub fn to_canvas(&self, x: f64, y: f64) -> (i64, i64) {
        (
            (x + f64::from(self.margin_left)).floor() as i64,
            (y + f64::from(self.margin_top)).floor() as i64,
        )
    }
}

/// Which way up a glyph lands on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    Upright,
    /// Rotated half a turn by the mirror step.
    Reflected,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Upright => Orientation::Reflected,
            Orientation::Reflected => Orientation::Upright,
        }
    }
}

/// A glyph rectangle in card-canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placement {
    pub y: i64,
    pub x: i64,
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(x: i64, y: i64, (width, height): (u32, u32)) -> Self {
        Self {
            y,
            x,
            width,
            height,
            orientation: Orientation::Upright,
        }
    }

    /// Where this rectangle lands after the half surface it sits on is turned
    /// half a turn and pasted at `paste_y`.
    pub fn point_reflected(&self, surface: (u32, u32), paste_y: i64) -> Self {
        let (surface_width, surface_height) = surface;
        Self {
            x: i64::from(surface_width) - self.x - i64::from(self.width),
            y: paste_y + i64::from(surface_height) - self.y - i64::from(self.height),
            width: self.width,
            height: self.height,
            orientation: self.orientation.flipped(),
        }
    }

    pub fn right(&self) -> i64 {
        self.x + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        self.y + i64::from(self.height)
    }
}

/// Fail with [`LayoutError::GeometryOverflow`] unless the rectangle lies wholly
/// inside a `surface` sized target.
pub fn ensure_fits(
    what: &'static str,
    x: i64,
    y: i64,
    size: (u32, u32),
    surface: (u32, u32),
) -> Result<()> {
    let (width, height) = size;
    let (surface_width, surface_height) = surface;
    let inside = x >= 0
        && y >= 0
        && x + i64::from(width) <= i64::from(surface_width)
        && y + i64::from(height) <= i64::from(surface_height);
    if inside {
        Ok(())
    } else {
        Err(LayoutError::GeometryOverflow {
            what,
            x,
            y,
            width,
            height,
            surface_width,
            surface_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn box_is_canvas_minus_margins() {
        let printable = PrintableBox::new(600, 800, 100, 100).unwrap();
        assert_eq!((printable.width, printable.height), (400, 600));
        assert_eq!(printable.to_canvas(0.0, 0.0), (100, 100));
        assert_eq!(printable.to_canvas(12.9, 0.5), (112, 100));
    }

    #[test]
    fn empty_box_is_a_configuration_error() {
        assert!(matches!(
            PrintableBox::new(200, 800, 100, 100),
            Err(LayoutError::Configuration(_))
        ));
        assert!(PrintableBox::new(201, 201, 100, 100).is_ok());
    }

    #[test]
    fn reflection_rotates_about_surface_centre() {
        let top_left = Placement::new(100, 100, (40, 60));
        let reflected = top_left.point_reflected((600, 400), 400);
        assert_eq!((reflected.x, reflected.y), (460, 640));
        assert_eq!(reflected.orientation, Orientation::Reflected);
        assert_eq!(reflected.right(), 600 - 100);
        assert_eq!(reflected.bottom(), 800 - 100);
    }

    #[test]
    fn overflow_is_reported_not_clamped() {
        assert!(ensure_fits("pip", 0, 0, (10, 10), (10, 10)).is_ok());
        let err = ensure_fits("pip", 5, -1, (10, 10), (20, 20)).unwrap_err();
        assert!(matches!(err, LayoutError::GeometryOverflow { y: -1, .. }));
        assert!(ensure_fits("pip", 11, 0, (10, 10), (20, 20)).is_err());
    }
}
