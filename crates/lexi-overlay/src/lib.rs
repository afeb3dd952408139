#![forbid(unsafe_code)]

//! Overlay controllers: the popover and the floating trigger.
//!
//! # Role in LexiPop
//! `lexi-overlay` holds the interaction logic of the two on-page surfaces.
//! Both controllers are synchronous state machines: feed them events, apply
//! the commands they return. They never touch the DOM, the audio device, or
//! the disk themselves, which is what keeps them testable without a
//! browser.
//!
//! # Primary responsibilities
//! - **[`BubbleController`]**: popover lifecycle, measure-then-place
//!   reveals, auto-pronunciation policy, optimistic add-intents.
//! - **[`TriggerController`]**: click-vs-drag classification and the
//!   persistent trigger position.
//! - **[`PositionStore`]**: the durability seam for that position.
//!
//! # How it fits in the system
//! The embedder owns the event loop: it routes pointer events and
//! measurement callbacks in, renders placements out, forwards
//! [`BubbleCmd::Pronounce`] to the shared `lexi-audio` player, and writes
//! [`TriggerCmd::Persist`] positions through a [`PositionStore`].

pub mod bubble;
pub mod store;
pub mod trigger;

pub use bubble::{BubbleCmd, BubbleController, BubblePhase};
pub use store::{JsonFileStore, MemoryStore, PositionStore, StoreError};
pub use trigger::{DragConfig, TriggerCmd, TriggerController, TriggerPosition};
