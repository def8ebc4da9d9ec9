//! Owner of the mutable settings between passes.

use crate::error::Result;
use crate::scene::{compute_scene, LayoutSettings, Scene, Viewport};
use crate::schedule::RedrawScheduler;
use crate::settings::Settings;
use log::warn;

/// Holds the only mutable [`Settings`] copy. Edits go through [`Plot::edit`]
/// and request a redraw; [`Plot::redraw`] runs one pass on a snapshot.
#[derive(Debug, Clone, Default)]
pub struct Plot {
    settings: Settings,
    layout: LayoutSettings,
    scheduler: RedrawScheduler,
}

impl Plot {
    pub fn new(settings: Settings, layout: LayoutSettings) -> Result<Self> {
        let settings = settings.snapshot()?;
        Ok(Self {
            settings,
            layout,
            scheduler: RedrawScheduler::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn layout(&self) -> &LayoutSettings {
        &self.layout
    }

    pub fn scheduler(&self) -> &RedrawScheduler {
        &self.scheduler
    }

    /// Applies a settings edit. On success a redraw is requested and the
    /// return value says whether the caller must schedule a frame.
    pub fn edit(&mut self, edit: impl FnOnce(&mut Settings) -> Result<()>) -> Result<bool> {
        edit(&mut self.settings)?;
        Ok(self.scheduler.request())
    }

    pub fn request_redraw(&mut self) -> bool {
        self.scheduler.request()
    }

    pub fn request_resize(&mut self) -> bool {
        self.scheduler.request_resize()
    }

    pub fn take_resize(&mut self) -> bool {
        self.scheduler.take_resize()
    }

    /// Runs one pass. The pending flag is cleared whether or not the pass
    /// succeeds, so a failed pass never blocks later requests.
    pub fn redraw(&mut self, viewport: &Viewport) -> Result<Scene> {
        let snapshot = self.settings;
        let scene = compute_scene(&snapshot, viewport, &self.layout);
        self.scheduler.complete();
        if let Err(err) = &scene {
            warn!("redraw skipped: {err}");
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_request_a_single_frame() {
        let mut plot = Plot::default();
        assert!(plot.edit(|s| s.set_eps(0.5)).expect("eps"));
        assert!(!plot.edit(|s| s.set_fmax(10.0)).expect("fmax"));
        assert!(plot.scheduler().is_pending());

        let scene = plot.redraw(&Viewport::default()).expect("scene");
        assert!(!plot.scheduler().is_pending());
        assert_eq!(scene.tau, plot.settings().tau);
        assert!(plot.request_redraw());
    }

    #[test]
    fn rejected_edit_keeps_settings_and_schedules_nothing() {
        let mut plot = Plot::default();
        let before = *plot.settings();
        let err = plot.edit(|s| s.set_n_freqs(0)).expect_err("n_freqs");
        assert!(err.is_domain());
        assert_eq!(*plot.settings(), before);
        assert!(!plot.scheduler().is_pending());
    }

    #[test]
    fn failed_pass_clears_pending_flag() {
        let mut plot = Plot::default();
        plot.request_redraw();
        let viewport = Viewport {
            width: 10.0,
            height: 10.0,
            device_pixel_ratio: 1.0,
        };
        assert!(plot.redraw(&viewport).is_err());
        assert!(!plot.scheduler().is_pending());
    }

    #[test]
    fn new_rejects_invalid_settings() {
        let settings = Settings {
            eps: -1.0,
            ..Settings::default()
        };
        let err = Plot::new(settings, LayoutSettings::default()).expect_err("eps");
        assert!(err.is_range());
    }
}
