//! prim-linked-map: an immutable, insertion-ordered open-addressing hash map
//! specialized for primitive keys and values.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one generic engine, monomorphized per key/value primitive pair, in
//!   place of a hand-written class per pair. No boxing of keys or values.
//! - Layers:
//!   - `primitive`: bit-pattern identity and avalanche mixing per domain.
//!   - `order`: a doubly linked list over slot indices, stored as one
//!     `Link { prev, next }` per slot.
//!   - `slot_table`: parallel key/value/link arrays plus an occupancy tag,
//!     linear probing over a power-of-two table.
//!   - `builder`: validates input and bulk-loads the table once.
//!   - `map`: `ImmutableOpenHashMap`, the frozen public type.
//!   - `cursor` / `views`: read-only traversal in insertion order.
//!
//! Constraints
//! - Built once, never resized, never mutated. No tombstones.
//! - Keys compare by bit pattern: `-0.0 != 0.0`, NaN matches only the
//!   identical NaN.
//! - Repeated input keys: last value wins, first occurrence fixes the
//!   position.
//! - Absent keys read as a configurable default value, not an error.
//!
//! Occupancy
//! - Every slot carries an explicit occupied flag, so the zero key is an
//!   ordinary key. There is no reserved slot for it and no special case in
//!   probing or seeking.
//!
//! Immutability
//! - The map has no mutating methods. Reading is expressed by the
//!   `PrimitiveMap` trait; there is no mutation trait for this type to
//!   implement, so misuse is a compile error.
//!
//! Threading
//! - Construction happens on one thread through `&mut` state. The finished
//!   map owns only boxed slices of `Copy` data and is `Send + Sync`; any
//!   number of readers may share it without locks.
//!
//! Costs
//! - `Cursor::position` after a seek walks from the first entry on every
//!   call. This is linear in the map size and is not memoized.
//! - `contains_value` scans the slot array.

mod builder;
pub mod capability;
pub mod config;
pub mod cursor;
mod error;
mod map;
mod map_proptest;
mod order;
pub mod primitive;
mod slot_table;
pub mod views;

// Public surface
pub use builder::Builder;
pub use capability::{FastIterable, PrimitiveMap};
pub use config::{BuildOptions, LoadFactor};
pub use cursor::{Cursor, FastIter, Iter, Keys, Values};
pub use error::{Error, Result};
pub use map::ImmutableOpenHashMap;
pub use primitive::Primitive;
pub use views::{Entry, EntrySet, KeySet, OrderedView, ValueCollection};
