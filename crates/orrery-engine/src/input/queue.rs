/// Input event types the engine understands.
/// Generic, with no game-specific semantics. Pointer coordinates are in
/// normalized device coordinates (x, y in [-1, 1], +y up) so games can
/// build picking rays straight from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began.
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended.
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved.
    PointerMove { x: f32, y: f32 },
    /// Scroll wheel / pinch; positive = zoom out.
    Wheel { delta: f32 },
    /// A staged intent from the UI layer (panel buttons, sliders, etc.).
    /// `kind` identifies the intent; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// UI handlers only stage intents here; the next frame consumes them.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
