use bevy::prelude::Resource;
use crossbeam_channel::Receiver;

use crate::net::{Outcome, WorkerHandle};

#[derive(Resource)]
pub struct NetRx(pub Receiver<Outcome>);

#[derive(Resource, Clone)]
pub struct RequestTx(pub WorkerHandle);
