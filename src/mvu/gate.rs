/// Identifies one camera animation from start to finish.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(pub u64);

/// Single-camera admission control. At most one animation runs at a time;
/// a request made while one is running is rejected, not queued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnimationGate {
    #[default]
    Idle,
    Animating { ticket: Ticket },
}

impl AnimationGate {
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, AnimationGate::Animating { .. })
    }

    /// Claims the camera with `ticket`. Returns `None` if it is already taken.
    pub fn request(&mut self, ticket: Ticket) -> Option<Ticket> {
        match self {
            AnimationGate::Idle => {
                *self = AnimationGate::Animating { ticket };
                Some(ticket)
            }
            AnimationGate::Animating { .. } => None,
        }
    }

    /// Releases the camera if `ticket` is the one holding it. Returns whether
    /// the gate changed.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        match self {
            AnimationGate::Animating { ticket: held } if *held == ticket => {
                *self = AnimationGate::Idle;
                true
            }
            _ => false,
        }
    }
}
