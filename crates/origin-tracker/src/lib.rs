//! Include-origin attribution for header-origin.
//!
//! A C front end hands us one flat, document-ordered stream of cursors per translation unit.
//! This crate reconstructs which physical file produced each declaration and through which
//! chain of `#include` directives that file was pulled in:
//! - [`PositionTracker`] consumes the cursor stream and maintains the origin table
//! - [`Position`] anchors a declaration and resolves its include chain lazily
//! - [`Origin`] records the shallowest known inclusion of a file
//!
//! # Example
//!
//! ```
//! use origin_tracker::{Cursor, CursorKind, FileLocation, PositionTracker, TrackerConfig};
//!
//! struct Node {
//!     kind: CursorKind,
//!     spelling: &'static str,
//!     location: FileLocation,
//! }
//!
//! impl Cursor for Node {
//!     fn kind(&self) -> CursorKind {
//!         self.kind
//!     }
//!     fn spelling(&self) -> &str {
//!         self.spelling
//!     }
//!     fn location(&self) -> Option<&FileLocation> {
//!         Some(&self.location)
//!     }
//! }
//!
//! let include = Node {
//!     kind: CursorKind::InclusionDirective,
//!     spelling: "depth1.h",
//!     location: FileLocation::new("/src/root.h", 1, 1),
//! };
//! let g = Node {
//!     kind: CursorKind::Declaration,
//!     spelling: "g",
//!     location: FileLocation::new("/src/depth1.h", 1, 5),
//! };
//!
//! let mut tracker = PositionTracker::new(TrackerConfig::default());
//! tracker.start("/src/root.h");
//! tracker.track(&include).unwrap();
//! assert_eq!(tracker.track(&g).unwrap(), 2);
//!
//! let pos = tracker.to_pos(&g);
//! assert_eq!(pos.origin().to_string(), "/src/root.h:1:1");
//! ```

mod cursor;
mod error;
mod origin;
mod path_match;
mod position;
mod tracker;

pub use cursor::{Cursor, CursorKind, FileLocation};
pub use error::TrackError;
pub use origin::{Depth, Origin, OriginTable};
pub use path_match::PathMatching;
pub use position::{OriginQuery, Position};
pub use tracker::{PositionTracker, TrackerConfig};
