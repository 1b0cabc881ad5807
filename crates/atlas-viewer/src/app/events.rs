use bevy::prelude::Event;

/// A rendered node was clicked.
#[derive(Event, Debug, Clone)]
pub struct Picked(pub String);
