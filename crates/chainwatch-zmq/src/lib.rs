//! chainwatch-zmq — ZeroMQ implementation of
//! [`NotificationSource`](chainwatch_core::NotificationSource).
//!
//! Wraps a SUB socket connected to the node's `-zmqpub*` publisher
//! endpoint and subscribed to the four notification topics.

pub mod source;

pub use source::ZmqSource;
