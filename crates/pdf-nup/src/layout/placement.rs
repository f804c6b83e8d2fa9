//! Content placement within cells
//!
//! Scales a source page uniformly to fit its cell, centers it, and builds
//! the transform that maps the page's media box onto the sheet.

use super::{Affine, GridPosition, Placement, Rect, SheetGeometry, cell_bounds};

/// Calculate where the source page with media box `media_box` lands when it
/// occupies cell `slot` (reading order) of a sheet.
///
/// The media box origin is honoured: a page whose box starts at
/// `(left, bottom)` is translated so that corner lands on the target.
pub fn place_page(geometry: &SheetGeometry, slot: usize, media_box: &Rect) -> Placement {
    let grid_pos = GridPosition::from_index(slot, geometry.cols);
    let cell = cell_bounds(geometry, grid_pos);

    let scale = fit_scale(media_box.width, media_box.height, cell.width, cell.height);

    let scaled_width = media_box.width * scale;
    let scaled_height = media_box.height * scale;

    let offset_x = (cell.width - scaled_width) / 2.0;
    let offset_y = (cell.height - scaled_height) / 2.0;

    let target_x = cell.x + offset_x;
    let target_y = cell.y + offset_y;

    let translate_x = target_x - media_box.x * scale;
    let translate_y = target_y - media_box.y * scale;

    let transform = Affine::scale(scale).then(&Affine::translate(translate_x, translate_y));

    Placement {
        slot,
        grid_pos,
        cell,
        scale,
        offset_x,
        offset_y,
        target_x,
        target_y,
        transform,
    }
}

/// Largest uniform scale that fits the source inside the target
fn fit_scale(src_width: f32, src_height: f32, target_width: f32, target_height: f32) -> f32 {
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    scale_w.min(scale_h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_geometry;
    use crate::options::SheetConfig;
    use crate::types::PaperSize;

    /// 2 rows x 1 col of 210 x 150 cells with a 10pt margin
    fn two_up() -> SheetGeometry {
        let config = SheetConfig {
            paper: PaperSize::Custom {
                width_pt: 230.0,
                height_pt: 330.0,
            },
            margin_pt: 10.0,
        };
        compute_geometry(2, &config).unwrap()
    }

    #[test]
    fn test_scale_fit() {
        // Width-limited
        assert!((fit_scale(800.0, 600.0, 400.0, 400.0) - 0.5).abs() < 0.001);
        // Height-limited
        assert!((fit_scale(400.0, 800.0, 400.0, 400.0) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_matching_aspect_fills_cell() {
        let geometry = two_up();
        let page = Rect::new(0.0, 0.0, 420.0, 300.0);

        let placement = place_page(&geometry, 0, &page);

        assert_eq!(placement.scale, 0.5);
        assert_eq!(placement.scale, geometry.cell_width / page.width);
        assert_eq!(placement.scale, geometry.cell_height / page.height);
        assert_eq!(placement.offset_x, 0.0);
        assert_eq!(placement.offset_y, 0.0);
        assert_eq!(placement.target_x, placement.cell.x);
        assert_eq!(placement.target_y, placement.cell.y);
    }

    #[test]
    fn test_narrow_page_is_centered_horizontally() {
        let geometry = two_up();
        // Height-limited: 150 / 300 = 0.5 < 210 / 200
        let page = Rect::new(0.0, 0.0, 200.0, 300.0);

        let placement = place_page(&geometry, 1, &page);

        assert_eq!(placement.scale, 0.5);
        assert_eq!(placement.offset_x, (210.0 - 100.0) / 2.0);
        assert_eq!(placement.offset_y, 0.0);
        assert_eq!(placement.target_x, 10.0 + 55.0);
        assert_eq!(placement.target_y, 10.0);
        assert_eq!(placement.content_rect(), Rect::new(65.0, 10.0, 100.0, 150.0));
    }

    #[test]
    fn test_wide_page_is_centered_vertically() {
        let geometry = two_up();
        // Width-limited: 210 / 420 = 0.5 < 150 / 100
        let page = Rect::new(0.0, 0.0, 420.0, 100.0);

        let placement = place_page(&geometry, 0, &page);

        assert_eq!(placement.scale, 0.5);
        assert_eq!(placement.offset_x, 0.0);
        assert_eq!(placement.offset_y, (150.0 - 50.0) / 2.0);
    }

    #[test]
    fn test_transform_maps_media_box_onto_target() {
        let geometry = two_up();
        let page = Rect::new(0.0, 0.0, 420.0, 300.0);

        let placement = place_page(&geometry, 0, &page);

        assert_eq!(placement.transform.apply(0.0, 0.0), (10.0, 170.0));
        assert_eq!(placement.transform.apply(420.0, 300.0), (220.0, 320.0));
    }

    #[test]
    fn test_nonzero_media_box_origin() {
        let geometry = two_up();
        let page = Rect::new(100.0, 50.0, 420.0, 300.0);

        let placement = place_page(&geometry, 1, &page);

        // The box corner, not the coordinate origin, lands on the target
        assert_eq!(placement.transform.e, 10.0 - 100.0 * 0.5);
        assert_eq!(placement.transform.f, 10.0 - 50.0 * 0.5);
        assert_eq!(placement.transform.apply(100.0, 50.0), (10.0, 10.0));
        assert_eq!(placement.transform.apply(520.0, 350.0), (220.0, 160.0));
    }

    #[test]
    fn test_slot_to_grid_position() {
        let geometry = compute_geometry(4, &SheetConfig::default()).unwrap();
        let page = Rect::new(0.0, 0.0, 595.27, 841.89);

        let positions: Vec<_> = (0..4)
            .map(|slot| place_page(&geometry, slot, &page).grid_pos)
            .collect();

        assert_eq!(positions, vec![
            GridPosition::new(0, 0),
            GridPosition::new(0, 1),
            GridPosition::new(1, 0),
            GridPosition::new(1, 1),
        ]);
    }
}
