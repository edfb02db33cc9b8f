//! Display-side handle

use portable_atomic::Ordering;

use super::frame_rate::FrameRateMonitor;
use super::FramePipeline;
use crate::display::{write_frame, PanelLayout};
use crate::traits::{Clock, FrameTransport};

/// Outcome of one presenting cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Presented {
    /// Running total of frames written, this one included
    pub frame: u32,
    /// Surface that was written
    pub surface: usize,
    /// New output rate, when a measurement window closed on this frame
    pub frame_rate: Option<f32>,
}

/// Consumer handle
///
/// There is exactly one, obtained from [`FramePipeline::split`]. The display
/// task calls [`present_next`](Self::present_next) forever.
pub struct Consumer<'a, const W: usize, const H: usize> {
    pipeline: &'a FramePipeline<W, H>,
    monitor: FrameRateMonitor,
}

impl<'a, const W: usize, const H: usize> Consumer<'a, W, H> {
    pub(super) fn new(pipeline: &'a FramePipeline<W, H>) -> Self {
        Self {
            pipeline,
            monitor: FrameRateMonitor::new(),
        }
    }

    /// Wait for the next swapped frame and write it to the panel
    ///
    /// The surface is marked consumed even when the transport fails, so a
    /// broken link never stalls the producer.
    pub async fn present_next<T, C>(
        &mut self,
        transport: &mut T,
        layout: &PanelLayout,
        clock: &C,
    ) -> Result<Presented, T::Error>
    where
        T: FrameTransport,
        C: Clock,
    {
        let index = loop {
            self.pipeline.frame_ready.wait().await;
            if let Some(index) = self.pipeline.take_ready() {
                break index;
            }
        };
        self.monitor.begin(clock.now_us());

        let result = {
            let surface = self.pipeline.surfaces[index].lock().await;
            write_frame(transport, layout, surface.as_bytes()).await
        };
        self.pipeline.mark_consumed(index);
        result?;

        let frame = self.pipeline.frames_presented.fetch_add(1, Ordering::Relaxed) + 1;
        let frame_rate = self.monitor.record(clock.now_us());
        if let Some(fps) = frame_rate {
            self.pipeline.publish_frame_rate(fps);
        }

        Ok(Presented {
            frame,
            surface: index,
            frame_rate,
        })
    }

    /// Frame rate measurement state
    pub fn monitor(&self) -> &FrameRateMonitor {
        &self.monitor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{WireColor, convert};
    use crate::testing::{ManualClock, RecordingTransport};
    use crate::traits::Window;
    use embassy_futures::block_on;

    struct BrokenTransport;

    impl FrameTransport for BrokenTransport {
        type Error = ();

        async fn set_window(&mut self, _window: Window) -> Result<(), ()> {
            Err(())
        }

        async fn write_pixels(&mut self, _bytes: &[u8]) -> Result<(), ()> {
            Err(())
        }

        async fn fill(&mut self, _color: WireColor, _count: usize) -> Result<(), ()> {
            Err(())
        }
    }

    fn layout() -> PanelLayout {
        PanelLayout::new(2, 2, 2, 2, convert(255, 0, 0)).unwrap()
    }

    #[test]
    fn test_frame_rate_from_synthetic_clock() {
        let pipeline: FramePipeline<2, 2> = FramePipeline::new();
        let (mut producer, mut consumer) = pipeline.split().unwrap();
        let mut transport = RecordingTransport::new();
        let clock = ManualClock::new();

        // 25 frames at 40 ms intervals close a window at exactly 1 s
        let mut last = None;
        for _ in 0..25 {
            clock.advance(40_000);
            block_on(producer.wait_for_reuse());
            producer.present_frame().unwrap();
            last = block_on(consumer.present_next(&mut transport, &layout(), &clock))
                .unwrap()
                .frame_rate;
        }

        // The window opened on the first frame, so 24 intervals elapsed
        assert_eq!(last, None);
        clock.advance(40_000);
        producer.present_frame().unwrap();
        let presented = block_on(consumer.present_next(&mut transport, &layout(), &clock)).unwrap();

        assert_eq!(presented.frame, 26);
        let fps = presented.frame_rate.unwrap();
        assert!((fps - 26.0).abs() < 1e-3, "fps {}", fps);
        assert_eq!(producer.frame_rate(), fps);
    }

    #[test]
    fn test_transport_error_still_releases_surface() {
        let pipeline: FramePipeline<2, 2> = FramePipeline::new();
        let (mut producer, mut consumer) = pipeline.split().unwrap();
        let clock = ManualClock::new();

        producer.present_frame().unwrap();
        let result = block_on(consumer.present_next(&mut BrokenTransport, &layout(), &clock));
        assert_eq!(result, Err(()));
        assert_eq!(pipeline.frames_presented(), 0);

        // The producer is not stuck behind the failed frame
        block_on(producer.wait_for_reuse());
        assert_eq!(producer.present_frame(), Ok(()));
    }

    #[test]
    fn test_presented_surface_alternates() {
        let pipeline: FramePipeline<2, 2> = FramePipeline::new();
        let (mut producer, mut consumer) = pipeline.split().unwrap();
        let mut transport = RecordingTransport::new();
        let clock = ManualClock::new();

        let mut surfaces = [0usize; 4];
        for slot in surfaces.iter_mut() {
            producer.present_frame().unwrap();
            *slot = block_on(consumer.present_next(&mut transport, &layout(), &clock))
                .unwrap()
                .surface;
        }
        assert_eq!(surfaces, [0, 1, 0, 1]);
    }
}
