mod render_state;

pub use render_state::{render_state, FormView, RenderState, START_PROMPT};
