pub mod gate;
pub mod runtime;
pub mod view_state;

pub use gate::{AnimationGate, Ticket};
pub use runtime::{Deps, ViewHandle, run_camera_plan, spawn_view};
pub use view_state::{
    CameraPlan, DirectionsSlot, Effect, Focus, Layout, Msg, QueryToken, RoutePurpose, UserEvent,
    ViewModel, update,
};
