//! Windowed frame writes with letterbox fill

use super::layout::PanelLayout;
use crate::traits::FrameTransport;

/// Write one frame to the panel
///
/// Fills the top band, streams `pixels` into the content window as a
/// single burst, then fills the bottom band. `pixels` must hold exactly
/// one content window of wire bytes.
pub async fn write_frame<T: FrameTransport>(
    transport: &mut T,
    layout: &PanelLayout,
    pixels: &[u8],
) -> Result<(), T::Error> {
    let content = layout.content_window();
    debug_assert_eq!(pixels.len(), content.pixel_count() * 2);

    if let Some(band) = layout.top_band() {
        transport.set_window(band).await?;
        transport.fill(layout.border(), band.pixel_count()).await?;
    }

    transport.set_window(content).await?;
    transport.write_pixels(pixels).await?;

    if let Some(band) = layout.bottom_band() {
        transport.set_window(band).await?;
        transport.fill(layout.border(), band.pixel_count()).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{convert, WireColor};
    use crate::surface::Surface;
    use crate::testing::{RecordingTransport, TransportOp};
    use crate::traits::Window;
    use embassy_futures::block_on;
    use std::vec;

    #[test]
    fn test_letterboxed_frame_sequence() {
        let mut surface: Surface<4, 2> = Surface::new();
        surface.clear(WireColor::WHITE);
        let border = convert(0, 0, 255);
        let layout = PanelLayout::new(4, 6, 4, 2, border).unwrap();

        let mut transport = RecordingTransport::new();
        block_on(write_frame(&mut transport, &layout, surface.as_bytes())).unwrap();

        assert_eq!(
            transport.ops,
            vec![
                TransportOp::Window(Window { x0: 0, y0: 0, x1: 3, y1: 1 }),
                TransportOp::Fill(border, 8),
                TransportOp::Window(Window { x0: 0, y0: 2, x1: 3, y1: 3 }),
                TransportOp::Pixels(vec![0xFF; 16]),
                TransportOp::Window(Window { x0: 0, y0: 4, x1: 3, y1: 5 }),
                TransportOp::Fill(border, 8),
            ]
        );
    }

    #[test]
    fn test_full_height_frame_is_single_burst() {
        let surface: Surface<4, 3> = Surface::new();
        let layout = PanelLayout::new(4, 3, 4, 3, WireColor::BLACK).unwrap();

        let mut transport = RecordingTransport::new();
        block_on(write_frame(&mut transport, &layout, surface.as_bytes())).unwrap();

        assert_eq!(transport.ops.len(), 2);
        assert_eq!(transport.rows_written(), 3);
    }

    #[test]
    fn test_rows_written_match_panel_height() {
        // Every content height a 16-row panel can show
        for content in 1..=16u16 {
            let layout = PanelLayout::new(2, 16, 2, content, WireColor::BLACK).unwrap();
            let pixels = vec![0u8; 2 * 2 * content as usize];

            let mut transport = RecordingTransport::new();
            block_on(write_frame(&mut transport, &layout, &pixels)).unwrap();

            assert_eq!(transport.rows_written(), 16, "content height {}", content);
            assert_eq!(transport.pixels_written(), 2 * 16);
        }
    }
}
