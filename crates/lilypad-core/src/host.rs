//! Callbacks supplied by the frontend that hosts the launcher.
//!
//! Every callback is optional. A missing one turns the matching feature
//! into a no-op: no input, no video, silence, or default settings.

use lilypad_types::input::Control;

type PollFn = Box<dyn FnMut()>;
type InputStateFn = Box<dyn FnMut(Control) -> bool>;
type VideoFn = Box<dyn FnMut(&[u16], u32, u32)>;
type AudioFn = Box<dyn FnMut(&[i16])>;
type VariableFn = Box<dyn FnMut(&str) -> Option<String>>;
type UpdatedFn = Box<dyn FnMut() -> bool>;

#[derive(Default)]
pub struct HostCallbacks {
    poll_input: Option<PollFn>,
    input_state: Option<InputStateFn>,
    video_refresh: Option<VideoFn>,
    audio_batch: Option<AudioFn>,
    get_variable: Option<VariableFn>,
    variables_updated: Option<UpdatedFn>,
}

impl std::fmt::Debug for HostCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCallbacks")
            .field("poll_input", &self.poll_input.is_some())
            .field("input_state", &self.input_state.is_some())
            .field("video_refresh", &self.video_refresh.is_some())
            .field("audio_batch", &self.audio_batch.is_some())
            .field("get_variable", &self.get_variable.is_some())
            .field("variables_updated", &self.variables_updated.is_some())
            .finish()
    }
}

impl HostCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_input(mut self, f: impl FnMut() + 'static) -> Self {
        self.poll_input = Some(Box::new(f));
        self
    }

    pub fn with_input_state(mut self, f: impl FnMut(Control) -> bool + 'static) -> Self {
        self.input_state = Some(Box::new(f));
        self
    }

    /// Receives each finished frame as RGB565 pixels plus width and height.
    pub fn with_video_refresh(mut self, f: impl FnMut(&[u16], u32, u32) + 'static) -> Self {
        self.video_refresh = Some(Box::new(f));
        self
    }

    /// Receives interleaved stereo samples once per frame.
    pub fn with_audio_batch(mut self, f: impl FnMut(&[i16]) + 'static) -> Self {
        self.audio_batch = Some(Box::new(f));
        self
    }

    pub fn with_get_variable(mut self, f: impl FnMut(&str) -> Option<String> + 'static) -> Self {
        self.get_variable = Some(Box::new(f));
        self
    }

    pub fn with_variables_updated(mut self, f: impl FnMut() -> bool + 'static) -> Self {
        self.variables_updated = Some(Box::new(f));
        self
    }

    pub fn poll_input(&mut self) {
        if let Some(f) = self.poll_input.as_mut() {
            f();
        }
    }

    pub fn input_state(&mut self, control: Control) -> bool {
        self.input_state.as_mut().is_some_and(|f| f(control))
    }

    pub fn video_refresh(&mut self, pixels: &[u16], width: u32, height: u32) {
        if let Some(f) = self.video_refresh.as_mut() {
            f(pixels, width, height);
        }
    }

    pub fn audio_batch(&mut self, samples: &[i16]) {
        if let Some(f) = self.audio_batch.as_mut() {
            f(samples);
        }
    }

    pub fn get_variable(&mut self, key: &str) -> Option<String> {
        self.get_variable.as_mut().and_then(|f| f(key))
    }

    /// Whether the host's settings changed since the last frame.
    pub fn variables_updated(&mut self) -> bool {
        self.variables_updated.as_mut().is_some_and(|f| f())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lilypad_types::input::Button;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn missing_callbacks_are_no_ops() {
        let mut host = HostCallbacks::new();
        host.poll_input();
        host.video_refresh(&[0; 4], 2, 2);
        host.audio_batch(&[0; 4]);
        assert!(!host.input_state(Control::Button(Button::Up)));
        assert_eq!(host.get_variable("lilypad_theme"), None);
        assert!(!host.variables_updated());
    }

    #[test]
    fn callbacks_are_forwarded() {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&frames);
        let mut host = HostCallbacks::new()
            .with_input_state(|c| c == Control::Button(Button::Confirm))
            .with_video_refresh(move |px, w, h| sink.borrow_mut().push((px.len(), w, h)))
            .with_get_variable(|key| (key == "lilypad_theme").then(|| "dusk".to_string()));

        assert!(host.input_state(Control::Button(Button::Confirm)));
        assert!(!host.input_state(Control::Button(Button::Cancel)));
        host.video_refresh(&[0; 6], 3, 2);
        assert_eq!(*frames.borrow(), vec![(6, 3, 2)]);
        assert_eq!(host.get_variable("lilypad_theme").as_deref(), Some("dusk"));
        assert_eq!(host.get_variable("other"), None);
    }
}
