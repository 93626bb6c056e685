// Domain layer: the wire shapes exchanged with the REST API and the ports the
// engine reads fixtures through. No transport, no persistence.

pub mod auth;
pub mod company;
pub mod envelope;
pub mod feed;
pub mod filters;
pub mod jobs;
pub mod model;
pub mod network;
pub mod notification;
pub mod ports;
pub mod stats;
pub mod user;
