//! Cursor dumps for header-origin.
//!
//! A C front end walks a translation unit and writes one JSON object per cursor,
//! in document order:
//!
//! ```text
//! {"kind":"inclusion_directive","spelling":"depth1.h","location":{"path":"/src/root.h","line":1,"column":1}}
//! {"kind":"declaration","spelling":"g","location":{"path":"/src/depth1.h","line":1,"column":5}}
//! {"kind":"other","spelling":"__STDC__"}
//! ```
//!
//! A missing `location` marks a built-in cursor. This crate reads such dumps into
//! [`CursorEvent`]s, which implement [`origin_tracker::Cursor`].
//!
//! # Example
//!
//! ```
//! use cursor_dump::parse_dump;
//! use origin_tracker::{PositionTracker, TrackerConfig};
//!
//! let dump = r#"
//! {"kind":"inclusion_directive","spelling":"depth1.h","location":{"path":"/src/root.h","line":1,"column":1}}
//! {"kind":"declaration","spelling":"g","location":{"path":"/src/depth1.h","line":1,"column":5}}
//! "#;
//!
//! let events = parse_dump(dump).unwrap();
//! let mut tracker = PositionTracker::new(TrackerConfig::default());
//! tracker.start("/src/root.h");
//! let depths: Vec<_> = events.iter().map(|e| tracker.track(e).unwrap()).collect();
//! assert_eq!(depths, vec![1, 2]);
//! ```

mod error;
mod event;
mod reader;

pub use error::DumpError;
pub use event::CursorEvent;
pub use reader::{parse_dump, read_dump, write_dump, DumpReader};
