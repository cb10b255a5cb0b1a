use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::core::error::{LayoutError, Result};
use crate::core::geometry::PrintableBox;
use crate::image::raster::{composite, transparent};

const BOX_OUTLINE: Rgba<u8> = Rgba([0xe0, 0x1b, 0x84, 0xff]);

/// Trace the printable box on a card for layout tuning.
pub fn outline_printable_box(canvas: &mut RgbaImage, printable: &PrintableBox) {
    let rect = Rect::at(printable.margin_left as i32, printable.margin_top as i32)
        .of_size(printable.width, printable.height);
    draw_hollow_rect_mut(canvas, rect, BOX_OUTLINE);
}

/// Overview image with one tile per card: ranks across, suits down.
pub struct PreviewSheet {
    image: RgbaImage,
    tile: (u32, u32),
}

impl PreviewSheet {
    pub fn new(tile: (u32, u32), columns: usize, rows: usize) -> Result<Self> {
        let width = sheet_extent(tile.0, columns, "columns")?;
        let height = sheet_extent(tile.1, rows, "rows")?;
        Ok(Self {
            image: transparent(width, height),
            tile,
        })
    }

    pub fn place(&mut self, column: usize, row: usize, card: &RgbaImage) -> Result<()> {
        let x = i64::from(self.tile.0) * column as i64;
        let y = i64::from(self.tile.1) * row as i64;
        composite(&mut self.image, card, x, y, "preview tile")
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

fn sheet_extent(tile: u32, count: usize, what: &str) -> Result<u32> {
    u32::try_from(count)
        .ok()
        .and_then(|count| tile.checked_mul(count))
        .ok_or_else(|| {
            LayoutError::Configuration(format!(
                "preview sheet of {} {} at {}px each does not fit in u32 pixels",
                count, what, tile
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::testing::solid;
    use pretty_assertions::assert_eq;

    #[test]
    fn tiles_land_on_their_grid_cell() {
        let mut sheet = PreviewSheet::new((4, 6), 3, 2).unwrap();
        let card = solid(4, 6, Rgba([1, 2, 3, 255]));
        sheet.place(2, 1, &card).unwrap();
        let image = sheet.into_image();
        assert_eq!(image.dimensions(), (12, 12));
        assert_eq!(*image.get_pixel(8, 6), Rgba([1, 2, 3, 255]));
        assert_eq!(image.get_pixel(7, 6)[3], 0);
    }

    #[test]
    fn tile_outside_sheet_overflows() {
        let mut sheet = PreviewSheet::new((4, 6), 3, 2).unwrap();
        let card = solid(4, 6, Rgba([1, 2, 3, 255]));
        assert!(matches!(
            sheet.place(3, 0, &card),
            Err(LayoutError::GeometryOverflow { .. })
        ));
    }

    #[test]
    fn oversized_sheet_is_rejected() {
        let err = PreviewSheet::new((70_000, 100), 70_000, 1).err().unwrap();
        assert!(matches!(err, LayoutError::Configuration(ref msg) if msg.contains("columns")));
        assert!(PreviewSheet::new((100, u32::MAX), 1, 2).is_err());
    }

    #[test]
    fn outline_follows_box_edges() {
        let printable = PrintableBox::new(20, 30, 5, 5).unwrap();
        let mut canvas = transparent(20, 30);
        outline_printable_box(&mut canvas, &printable);
        assert_eq!(*canvas.get_pixel(5, 5), BOX_OUTLINE);
        assert_eq!(*canvas.get_pixel(14, 24), BOX_OUTLINE);
        assert_eq!(canvas.get_pixel(10, 10)[3], 0);
    }
}
