//! Engine: GPU context, renderer and camera around the animated scene
//! state.

mod state;

pub use state::{scene_rng, ActionResponse, SceneState};

use crate::audio::AudioController;
use crate::camera::controller::CameraController;
use crate::controls::Controls;
use crate::error::RetrowaveError;
use crate::gpu::render_context::RenderContext;
use crate::input::{InputEvent, KeyAction};
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::util::clock::Clock;
use crate::util::frame_timing::FrameTiming;

/// Frame cap; the browser and `Fifo` present mode pace below this anyway.
const TARGET_FPS: u32 = 0;

/// Frames between frame-rate log lines.
const STATS_INTERVAL: u64 = 600;

/// The synthwave scene engine.
///
/// Owns the GPU context, the scene renderer, the fixed camera and the
/// animated [`SceneState`].
///
/// # Frame loop
///
/// Each frame, call [`update`](Self::update) then [`render`](Self::render).
/// Call [`resize`](Self::resize) when the surface size changes. Keys and
/// clicks go through [`handle_input`](Self::handle_input) or
/// [`handle_action`](Self::handle_action).
pub struct RetrowaveEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    renderer: SceneRenderer,
    /// Fixed camera and its uniform.
    pub camera_controller: CameraController,
    state: SceneState,
    clock: Clock,
    frame_timing: FrameTiming,
    options: Options,
}

impl RetrowaveEngine {
    /// Create the GPU context for `target` and build the scene.
    ///
    /// `size` is in physical pixels; `scale_factor` is only logged, the
    /// caller decides the pixel ratio.
    ///
    /// # Errors
    ///
    /// Returns [`RetrowaveError`] if GPU initialization or shader
    /// composition fails.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        scale_factor: f64,
        options: Options,
    ) -> Result<Self, RetrowaveError> {
        let context = RenderContext::new(target, size).await?;
        log::info!(
            "surface {}x{} at scale {scale_factor:.2}, format {:?}",
            size.0,
            size.1,
            context.format()
        );
        Self::new_from_context(context, options)
    }

    /// Engine from a pre-built [`RenderContext`].
    ///
    /// # Errors
    ///
    /// Returns [`RetrowaveError::Shader`] if a shader fails to compose.
    pub fn new_from_context(
        context: RenderContext,
        options: Options,
    ) -> Result<Self, RetrowaveError> {
        let audio = AudioController::new(&options.audio);
        let state = SceneState::new(&options, audio);
        let fog = state.scene.fog;
        let camera_controller =
            CameraController::new(&context, &options.camera, &fog);
        let renderer = SceneRenderer::new(&context, &camera_controller.layout)?;
        log::info!(
            "scene ready: {} nodes, {} palms, {} arches, {} city blocks",
            state.scene.node_count(),
            state.handles.palms.len(),
            state.handles.arches.len(),
            state.handles.city_blocks.len()
        );
        Ok(Self {
            context,
            renderer,
            camera_controller,
            state,
            clock: Clock::new(options.world.max_frame_delta),
            frame_timing: FrameTiming::new(TARGET_FPS),
            options,
        })
    }

    /// Advance the clock, the beam interval, the animation and audio
    /// loading. Returns `false` if the frame cap says to skip rendering.
    pub fn update(&mut self) -> bool {
        let tick = self.clock.tick();
        let _ = self.state.update(tick.elapsed, tick.delta);
        self.camera_controller.update_gpu(
            &self.context.queue,
            &self.state.scene.fog,
            tick.elapsed,
        );
        self.frame_timing.should_render(tick.delta)
    }

    /// Draw and present one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] for unrecoverable surface errors.
    /// `Lost` and `Outdated` reconfigure the surface and skip the frame.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.prepare(
            &self.context,
            &self.state.scene,
            self.camera_controller.camera.eye,
        );
        let mut encoder = self.context.create_encoder();
        self.renderer.render(
            &mut encoder,
            &view,
            self.context.depth_view(),
            &self.camera_controller.bind_group,
            self.state.scene.fog.color,
        );
        self.context.submit(encoder);
        frame.present();
        self.frame_timing.end_frame();
        if self.frame_timing.frames() % STATS_INTERVAL == 0 {
            log::debug!(
                "{:.0} fps, {} draws",
                self.frame_timing.fps(),
                self.renderer.draw_count()
            );
        }
        Ok(())
    }

    /// Resize the surface, depth buffer and camera aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.camera_controller.resize(width, height);
    }

    /// Route a platform-agnostic input event. Any event counts as the user
    /// gesture that unlocks audio.
    pub fn handle_input(&mut self, event: &InputEvent) -> ActionResponse {
        self.state.handle_input(event, &self.options.keybindings)
    }

    /// Apply a bound action.
    pub fn handle_action(&mut self, action: KeyAction) -> ActionResponse {
        self.state.handle_action(action)
    }

    /// Flip background music and return the new state.
    pub fn toggle_music(&mut self) -> bool {
        self.state.toggle_music()
    }

    /// Flip sound effects and return the new state.
    pub fn toggle_sound(&mut self) -> bool {
        self.state.toggle_sound()
    }

    /// Start a beam cycle now.
    pub fn fire_beam(&mut self) {
        self.state.fire_beam();
    }

    /// Let audio start after a user gesture.
    pub fn resume_audio(&mut self) {
        self.state.resume_audio();
    }

    /// Hover blip for UI elements, at `volume` or the configured level.
    pub fn play_hover(&mut self, volume: Option<f32>) {
        self.state.play_hover(volume);
    }

    /// Current toggle states.
    #[must_use]
    pub fn controls(&self) -> &Controls {
        self.state.controls()
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

}
