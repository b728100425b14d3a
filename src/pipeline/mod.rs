//! The live processing pipeline.
//!
//! A [`Session`] binds a source image to a filter and its slider state and
//! re-processes synchronously on every change: every load, filter switch,
//! and slider tick is one full pass through the engine. Output from the
//! last successful pass is retained for export.
//!
//! All operations run to completion on the calling thread. The only
//! asynchronous boundary is [`Session::save`], whose outcome is delivered
//! through callbacks and never touches session state.

use crate::catalog::FilterDescriptor;
use crate::core::types::{ControlKind, FilterArgs, ParameterState, SessionId};
use crate::engine::{self, FilterEngine};
use crate::export::{PhotoWriter, SaveFailure, SaveSuccess};
use image::{DynamicImage, RgbaImage};
use std::sync::Arc;

/// One live editing session.
pub struct Session {
    id: SessionId,
    engine: Arc<dyn FilterEngine>,
    filter: FilterDescriptor,
    params: ParameterState,
    source: Option<RgbaImage>,
    processed: Option<RgbaImage>,
}

impl Session {
    /// Session on the process-wide engine context, starting on `filter`
    /// with default slider positions and no source image.
    pub fn new(filter: &FilterDescriptor) -> Self {
        Self::with_engine(filter, engine::shared())
    }

    /// Session on a caller-supplied engine backend.
    pub fn with_engine(filter: &FilterDescriptor, engine: Arc<dyn FilterEngine>) -> Self {
        let id = SessionId::new();
        log::debug!("session {}: created with filter '{}'", id, filter.id);
        Self {
            id,
            engine,
            filter: filter.clone(),
            params: ParameterState::default(),
            source: None,
            processed: None,
        }
    }

    /// This session's identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The active filter.
    pub fn filter(&self) -> &FilterDescriptor {
        &self.filter
    }

    /// Current slider state.
    pub fn parameters(&self) -> &ParameterState {
        &self.params
    }

    /// Extent of the bound source, if any.
    pub fn source_extent(&self) -> Option<(u32, u32)> {
        self.source.as_ref().map(|source| source.dimensions())
    }

    /// The most recent processed bitmap.
    pub fn processed(&self) -> Option<&RgbaImage> {
        self.processed.as_ref()
    }

    /// Whether a processed result exists to export.
    pub fn has_processed(&self) -> bool {
        self.processed.is_some()
    }

    /// Bind a source image and re-process.
    ///
    /// `None` models a picker that was dismissed without a choice and is a
    /// silent no-op: the session keeps its current source and output.
    pub fn load(&mut self, image: impl Into<Option<DynamicImage>>) {
        let Some(image) = image.into() else {
            log::debug!("session {}: load without a source image, ignoring", self.id);
            return;
        };
        let source = image.to_rgba8();
        log::debug!(
            "session {}: loaded source {}x{}",
            self.id,
            source.width(),
            source.height()
        );
        self.source = Some(source);
        self.process();
    }

    /// Switch the active filter and re-process.
    ///
    /// Slider state is preserved across the switch: kinds the new filter
    /// does not accept are simply not forwarded, never cleared.
    pub fn set_filter(&mut self, filter: &FilterDescriptor) {
        log::debug!(
            "session {}: filter '{}' -> '{}'",
            self.id,
            self.filter.id,
            filter.id
        );
        self.filter = filter.clone();
        self.process();
    }

    /// Move one slider and re-process.
    ///
    /// Every tick is its own full pass; there is no batching or debouncing.
    /// Values clamp to the control's declared range; non-finite values are
    /// ignored.
    pub fn set_parameter(&mut self, control: ControlKind, value: f64) {
        if !self.params.set(control, value) {
            log::warn!(
                "session {}: ignoring non-finite value for {}",
                self.id,
                control
            );
            return;
        }
        self.process();
    }

    /// Export the processed bitmap through `writer`.
    ///
    /// A no-op when nothing has been processed yet: the writer is not
    /// invoked and neither callback fires. Otherwise the writer receives a
    /// copy and reports through exactly one of the callbacks.
    pub fn save(&self, writer: &dyn PhotoWriter, on_success: SaveSuccess, on_failure: SaveFailure) {
        let Some(processed) = &self.processed else {
            log::debug!("session {}: nothing processed yet, save ignored", self.id);
            return;
        };
        log::debug!(
            "session {}: exporting {}x{}",
            self.id,
            processed.width(),
            processed.height()
        );
        writer.write(processed.clone(), on_success, on_failure);
    }

    /// Run one pass: forward the sliders through the active capability set,
    /// invoke the engine, and store whatever extent it returns.
    ///
    /// Without a source this does nothing. On engine failure the previous
    /// processed result stays in place and the failure is logged; there is
    /// no API-level error surface for it.
    fn process(&mut self) {
        let Some(source) = &self.source else {
            return;
        };
        let args = FilterArgs::forward(self.filter.capabilities, &self.params, source.dimensions());
        match self.engine.apply(self.filter.kind, source, &args) {
            Ok(output) => {
                log::debug!(
                    "session {}: processed '{}' -> {}x{}",
                    self.id,
                    self.filter.id,
                    output.width(),
                    output.height()
                );
                self.processed = Some(output);
            }
            Err(err) => {
                log::warn!(
                    "session {}: filter '{}' produced no output: {}",
                    self.id,
                    self.filter.id,
                    err
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FilterKind;
    use crate::core::error::EngineError;
    use crate::core::types::ParamKind;
    use crate::engine::RasterEngine;
    use crate::export::testing::RecordingWriter;
    use image::{Rgba, RgbaImage};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Engine double recording every call, tagging each output with the
    /// call count so tests can tell results apart.
    #[derive(Default)]
    struct RecordingEngine {
        calls: Mutex<Vec<(FilterKind, (u32, u32), FilterArgs)>>,
        output_extent: Option<(u32, u32)>,
        fail: AtomicBool,
    }

    impl RecordingEngine {
        fn with_output_extent(extent: (u32, u32)) -> Self {
            Self {
                output_extent: Some(extent),
                ..Self::default()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn last_args(&self) -> FilterArgs {
            let calls = self.calls.lock().unwrap();
            calls.last().map(|(_, _, args)| *args).unwrap()
        }
    }

    impl FilterEngine for RecordingEngine {
        fn apply(
            &self,
            filter: FilterKind,
            source: &RgbaImage,
            args: &FilterArgs,
        ) -> Result<RgbaImage, EngineError> {
            let tag = {
                let mut calls = self.calls.lock().unwrap();
                calls.push((filter, source.dimensions(), *args));
                calls.len() as u8
            };
            if self.fail.load(Ordering::SeqCst) {
                return Err(EngineError::Unsupported {
                    filter: filter.id().to_string(),
                });
            }
            let (width, height) = self.output_extent.unwrap_or_else(|| source.dimensions());
            Ok(RgbaImage::from_pixel(width, height, Rgba([tag, 0, 0, 255])))
        }
    }

    fn descriptor(kind: FilterKind) -> FilterDescriptor {
        FilterDescriptor::new(kind)
    }

    fn photo(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8, 255])
        }))
    }

    #[test]
    fn test_load_nothing_is_a_silent_no_op() {
        let engine = Arc::new(RecordingEngine::default());
        let mut session = Session::with_engine(&descriptor(FilterKind::SepiaTone), engine.clone());

        session.load(None);
        assert_eq!(engine.call_count(), 0);
        assert!(!session.has_processed());
        assert!(session.source_extent().is_none());
    }

    #[test]
    fn test_load_binds_source_and_processes() {
        let engine = Arc::new(RecordingEngine::default());
        let mut session = Session::with_engine(&descriptor(FilterKind::SepiaTone), engine.clone());

        session.load(photo(20, 10));
        assert_eq!(engine.call_count(), 1);
        assert_eq!(session.source_extent(), Some((20, 10)));
        assert!(session.has_processed());
    }

    #[test]
    fn test_every_slider_tick_is_a_full_pass() {
        let engine = Arc::new(RecordingEngine::default());
        let mut session =
            Session::with_engine(&descriptor(FilterKind::GaussianBlur), engine.clone());
        session.load(photo(8, 8));

        session.set_parameter(ControlKind::Radius, 0.2);
        session.set_parameter(ControlKind::Radius, 0.4);
        session.set_parameter(ControlKind::RadiusMultiplier, 10.0);
        assert_eq!(engine.call_count(), 4);
    }

    #[test]
    fn test_only_capability_subset_is_forwarded() {
        let engine = Arc::new(RecordingEngine::default());
        let mut session = Session::with_engine(&descriptor(FilterKind::SepiaTone), engine.clone());
        session.load(photo(8, 8));

        // Sliders outside sepia's capability set must not reach the engine.
        session.set_parameter(ControlKind::Radius, 0.9);
        session.set_parameter(ControlKind::Angle, 270.0);

        let args = engine.last_args();
        assert_eq!(args.intensity, Some(0.5));
        assert_eq!(args.radius, None);
        assert_eq!(args.angle, None);
        assert_eq!(args.scale, None);
        assert_eq!(args.center, None);
    }

    #[test]
    fn test_blur_forwards_radius_product() {
        let engine = Arc::new(RecordingEngine::default());
        let mut session =
            Session::with_engine(&descriptor(FilterKind::GaussianBlur), engine.clone());
        session.load(photo(64, 64));

        session.set_parameter(ControlKind::Radius, 0.1);
        session.set_parameter(ControlKind::RadiusMultiplier, 500.0);

        let args = engine.last_args();
        assert_eq!(args.radius, Some(50.0));
        assert!(session.has_processed());
    }

    #[test]
    fn test_scale_filter_sees_mapped_intensity() {
        let engine = Arc::new(RecordingEngine::default());
        let mut session = Session::with_engine(&descriptor(FilterKind::Pixellate), engine.clone());
        session.load(photo(30, 30));

        session.set_parameter(ControlKind::Intensity, 0.25);

        let args = engine.last_args();
        assert_eq!(args.scale, Some(50.0));
        assert_eq!(args.intensity, None);
        assert_eq!(args.center, Some((15.0, 15.0)));
    }

    #[test]
    fn test_switching_filters_preserves_slider_state() {
        let engine = Arc::new(RecordingEngine::default());
        let mut session = Session::with_engine(&descriptor(FilterKind::SepiaTone), engine.clone());
        session.load(photo(8, 8));
        session.set_parameter(ControlKind::Intensity, 0.8);

        // Blur ignores intensity, but the value must survive the detour.
        session.set_filter(&descriptor(FilterKind::GaussianBlur));
        assert_eq!(engine.last_args().intensity, None);
        assert_eq!(session.parameters().intensity, 0.8);

        session.set_filter(&descriptor(FilterKind::SepiaTone));
        assert_eq!(engine.last_args().intensity, Some(0.8));
    }

    #[test]
    fn test_set_filter_reprocesses() {
        let engine = Arc::new(RecordingEngine::default());
        let mut session = Session::with_engine(&descriptor(FilterKind::Comic), engine.clone());
        session.load(photo(8, 8));

        session.set_filter(&descriptor(FilterKind::Edges));
        assert_eq!(engine.call_count(), 2);
        let calls = engine.calls.lock().unwrap();
        assert_eq!(calls[1].0, FilterKind::Edges);
    }

    #[test]
    fn test_engine_failure_keeps_previous_output() {
        let engine = Arc::new(RecordingEngine::default());
        let mut session = Session::with_engine(&descriptor(FilterKind::SepiaTone), engine.clone());
        session.load(photo(8, 8));
        let first_tag = session.processed().map(|image| image.get_pixel(0, 0)[0]);
        assert_eq!(first_tag, Some(1));

        engine.fail.store(true, Ordering::SeqCst);
        session.set_parameter(ControlKind::Intensity, 0.9);

        // The failed pass ran but the last good output is still there.
        assert_eq!(engine.call_count(), 2);
        let tag = session.processed().map(|image| image.get_pixel(0, 0)[0]);
        assert_eq!(tag, Some(1));
        // The slider change itself is kept.
        assert_eq!(session.parameters().intensity, 0.9);
    }

    #[test]
    fn test_output_extent_is_the_engines_choice() {
        let engine = Arc::new(RecordingEngine::with_output_extent((3, 9)));
        let mut session =
            Session::with_engine(&descriptor(FilterKind::GaussianBlur), engine.clone());
        session.load(photo(20, 20));

        assert_eq!(session.processed().map(|image| image.dimensions()), Some((3, 9)));
        assert_eq!(session.source_extent(), Some((20, 20)));
    }

    #[test]
    fn test_non_finite_slider_value_is_ignored() {
        let engine = Arc::new(RecordingEngine::default());
        let mut session = Session::with_engine(&descriptor(FilterKind::SepiaTone), engine.clone());
        session.load(photo(8, 8));

        session.set_parameter(ControlKind::Intensity, f64::NAN);
        assert_eq!(engine.call_count(), 1);
        assert_eq!(session.parameters().intensity, 0.5);
    }

    #[test]
    fn test_save_without_result_never_touches_writer() {
        let engine = Arc::new(RecordingEngine::default());
        let session = Session::with_engine(&descriptor(FilterKind::SepiaTone), engine);
        let writer = RecordingWriter::default();

        let fired = Arc::new(AtomicBool::new(false));
        let on_success: SaveSuccess = {
            let fired = fired.clone();
            Box::new(move |_| fired.store(true, Ordering::SeqCst))
        };
        let on_failure: SaveFailure = {
            let fired = fired.clone();
            Box::new(move |_| fired.store(true, Ordering::SeqCst))
        };
        session.save(&writer, on_success, on_failure);

        assert!(writer.writes.lock().unwrap().is_empty());
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_save_hands_processed_bitmap_to_writer() {
        let engine = Arc::new(RecordingEngine::with_output_extent((5, 6)));
        let mut session = Session::with_engine(&descriptor(FilterKind::SepiaTone), engine);
        session.load(photo(12, 12));

        let writer = RecordingWriter::default();
        let succeeded = Arc::new(AtomicBool::new(false));
        let on_success: SaveSuccess = {
            let succeeded = succeeded.clone();
            Box::new(move |_| succeeded.store(true, Ordering::SeqCst))
        };
        session.save(&writer, on_success, Box::new(|_| {}));

        assert_eq!(*writer.writes.lock().unwrap(), vec![(5, 6)]);
        assert!(succeeded.load(Ordering::SeqCst));
    }

    #[test]
    fn test_save_failure_reaches_failure_callback() {
        let engine = Arc::new(RecordingEngine::default());
        let mut session = Session::with_engine(&descriptor(FilterKind::SepiaTone), engine);
        session.load(photo(4, 4));

        let writer = RecordingWriter {
            fail: true,
            ..RecordingWriter::default()
        };
        let failed = Arc::new(AtomicBool::new(false));
        let on_failure: SaveFailure = {
            let failed = failed.clone();
            Box::new(move |_| failed.store(true, Ordering::SeqCst))
        };
        session.save(&writer, Box::new(|_| {}), on_failure);
        assert!(failed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_out_of_set_parameter_leaves_output_identical() {
        let engine: Arc<dyn FilterEngine> = Arc::new(RasterEngine::new());
        let mut session = Session::with_engine(&descriptor(FilterKind::SepiaTone), engine);
        session.load(photo(16, 16));
        let before = session.processed().map(|image| image.as_raw().clone());

        // Sepia accepts only intensity; these ticks still reprocess but the
        // bytes must not move.
        session.set_parameter(ControlKind::Radius, 0.9);
        session.set_parameter(ControlKind::Angle, 270.0);

        let after = session.processed().map(|image| image.as_raw().clone());
        assert!(before.is_some());
        assert_eq!(before, after);
    }

    #[test]
    fn test_processing_is_bit_identical_across_sessions() {
        let engine: Arc<dyn FilterEngine> = Arc::new(RasterEngine::new());
        let blur = descriptor(FilterKind::GaussianBlur);

        let mut first = Session::with_engine(&blur, engine.clone());
        let mut second = Session::with_engine(&blur, engine);
        first.load(photo(16, 16));
        second.load(photo(16, 16));
        first.set_parameter(ControlKind::Radius, 0.3);
        second.set_parameter(ControlKind::Radius, 0.3);

        let a = first.processed().map(|image| image.as_raw().clone());
        let b = second.processed().map(|image| image.as_raw().clone());
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn test_reprocessing_same_state_is_bit_identical() {
        let engine: Arc<dyn FilterEngine> = Arc::new(RasterEngine::new());
        let mut session = Session::with_engine(&descriptor(FilterKind::Comic), engine);
        session.load(photo(16, 16));
        let before = session.processed().map(|image| image.as_raw().clone());

        // Re-binding the same source runs another full pass.
        session.load(photo(16, 16));
        let after = session.processed().map(|image| image.as_raw().clone());
        assert_eq!(before, after);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn forwarding_is_restricted_to_capabilities(
                intensity in 0.0f64..=1.0,
                radius in 0.0f64..=1.0,
                multiplier in 1.0f64..=2000.0,
                angle in 0.0f64..=360.0,
                filter_index in 0usize..FilterKind::ALL.len(),
            ) {
                let kind = FilterKind::ALL[filter_index];
                let caps = kind.capabilities();
                let mut params = ParameterState::default();
                params.set(ControlKind::Intensity, intensity);
                params.set(ControlKind::Radius, radius);
                params.set(ControlKind::RadiusMultiplier, multiplier);
                params.set(ControlKind::Angle, angle);

                let args = FilterArgs::forward(caps, &params, (64, 64));
                prop_assert_eq!(args.intensity.is_some(), caps.contains(ParamKind::Intensity));
                prop_assert_eq!(args.radius.is_some(), caps.contains(ParamKind::Radius));
                prop_assert_eq!(args.scale.is_some(), caps.contains(ParamKind::Scale));
                prop_assert_eq!(args.angle.is_some(), caps.contains(ParamKind::Angle));
                prop_assert_eq!(args.center.is_some(), caps.contains(ParamKind::CenterPoint));

                // Forwarding is a pure function of the state.
                prop_assert_eq!(args, FilterArgs::forward(caps, &params, (64, 64)));
            }

            #[test]
            fn identical_sessions_agree_bitwise(
                radius in 0.0f64..=1.0,
                multiplier in 1.0f64..=30.0,
            ) {
                let engine: Arc<dyn FilterEngine> = Arc::new(RasterEngine::new());
                let blur = descriptor(FilterKind::GaussianBlur);
                let mut a = Session::with_engine(&blur, engine.clone());
                let mut b = Session::with_engine(&blur, engine);
                a.load(photo(12, 12));
                b.load(photo(12, 12));
                a.set_parameter(ControlKind::Radius, radius);
                b.set_parameter(ControlKind::Radius, radius);
                a.set_parameter(ControlKind::RadiusMultiplier, multiplier);
                b.set_parameter(ControlKind::RadiusMultiplier, multiplier);

                let left = a.processed().map(|image| image.as_raw().clone());
                let right = b.processed().map(|image| image.as_raw().clone());
                prop_assert!(left.is_some());
                prop_assert_eq!(left, right);
            }
        }
    }
}
