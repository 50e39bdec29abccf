//! The position tracker: virtual inclusion stack reconstruction.
//!
//! The front end never says "entered file" or "left file". Every non-declaration
//! cursor is compared against the stack of currently open files instead:
//! - a cursor in the file an `#include` just named means that file was entered
//! - a cursor in a file further down the stack means everything above it was left
//! - a cursor anywhere else means the included file produced no cursors at all
//!
//! Declarations are looked up in the origin table, which is complete by the time
//! they appear because every `#include` precedes the declarations it introduces.
//! A declaration only touches the stack when it is the first cursor of the file
//! the pending `#include` named.

use crate::position::OriginQuery;
use crate::{Cursor, CursorKind, Depth, Origin, OriginTable, PathMatching, Position, TrackError};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, log_enabled, trace, Level};
use rustc_hash::FxHashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Configuration for a [`PositionTracker`].
#[derive(Debug, Clone, Default)]
pub struct TrackerConfig {
    /// How resolved paths are matched against include spellings.
    pub path_matching: PathMatching,
    /// Dump the inclusion stack and origin table at trace level.
    pub dump_state: bool,
}

impl TrackerConfig {
    /// Sets the path matching strategy.
    pub fn with_path_matching(mut self, path_matching: PathMatching) -> Self {
        self.path_matching = path_matching;
        self
    }

    /// Enables or disables state dumps.
    pub fn with_state_dumps(mut self, dump_state: bool) -> Self {
        self.dump_state = dump_state;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Preprocessing,
    Declarations,
}

/// Attributes every cursor of a translation unit to the file it came from and
/// the shallowest chain of `#include`s that reached that file.
#[derive(Debug)]
pub struct PositionTracker {
    config: TrackerConfig,
    origins: Arc<RwLock<OriginTable>>,
    /// Include spelling -> path the front end resolved it to.
    real_paths: FxHashMap<String, Utf8PathBuf>,
    /// Open files, innermost last.
    stack: Vec<Utf8PathBuf>,
    /// Origin of the latest `#include`, until its file shows up.
    pending: Option<Origin>,
    /// Spelling of the file the pending origin belongs to.
    expected_file: String,
    mode: Mode,
}

impl PositionTracker {
    /// Creates a tracker. Call [`PositionTracker::start`] before tracking.
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            origins: Arc::default(),
            real_paths: FxHashMap::default(),
            stack: Vec::new(),
            pending: None,
            expected_file: String::new(),
            mode: Mode::Preprocessing,
        }
    }

    /// Begins tracking a new translation unit rooted at `root`.
    ///
    /// Positions handed out for a previous translation unit keep reading that
    /// unit's origin table.
    pub fn start(&mut self, root: impl AsRef<Utf8Path>) {
        let root = root.as_ref();
        debug!("start tracking {root}");
        self.origins = Arc::default();
        self.real_paths.clear();
        self.stack.clear();
        self.pending = Some(Origin::TOP);
        self.expected_file = root.to_string();
        self.mode = Mode::Preprocessing;
    }

    /// Tracks the next cursor of the stream and returns its depth.
    ///
    /// Declarations get the depth of their file (1 for the root). Other cursors
    /// get the height of the inclusion stack, and built-ins get 0.
    pub fn track<C: Cursor + ?Sized>(&mut self, cursor: &C) -> Result<Depth, TrackError> {
        let Some(loc) = cursor.location() else {
            return match self.stack.last() {
                None => Ok(0),
                Some(top) => Err(TrackError::BuiltinInsideInclude {
                    top: top.clone(),
                    depth: self.stack.len(),
                }),
            };
        };
        let current = loc.path();

        if cursor.is_declaration() {
            return self.track_declaration(current);
        }

        self.reconcile_stack(current)?;

        if cursor.kind() == CursorKind::InclusionDirective {
            self.pending = Some(Origin::new(self.stack.len(), loc.clone()));
            self.expected_file = cursor.spelling().to_owned();
            self.dump_stack();
        }
        Ok(self.stack.len())
    }

    /// Creates a position for `cursor` whose origin is resolved against this
    /// tracker's origin table.
    pub fn to_pos<C: Cursor + ?Sized>(&self, cursor: &C) -> Position {
        match cursor.location() {
            Some(loc) => Position::new(loc.clone(), self.query()),
            None => Position::none(),
        }
    }

    /// A read-only handle on the current origin table.
    pub fn query(&self) -> OriginQuery {
        OriginQuery::new(Arc::clone(&self.origins))
    }

    /// The recorded origin of `path`.
    pub fn origin_of(&self, path: impl AsRef<Utf8Path>) -> Option<Origin> {
        self.origins().get(path.as_ref()).cloned()
    }

    /// The depth of declarations in `path`, if the file has been recorded.
    pub fn depth_of(&self, path: impl AsRef<Utf8Path>) -> Option<Depth> {
        self.origins().get(path.as_ref()).map(|o| o.depth() + 1)
    }

    /// The path an include spelling was first resolved to.
    pub fn resolved_path(&self, spelling: &str) -> Option<&Utf8Path> {
        self.real_paths.get(spelling).map(Utf8PathBuf::as_path)
    }

    /// The currently open files, outermost first.
    pub fn stack(&self) -> &[Utf8PathBuf] {
        &self.stack
    }

    /// Returns true until the first declaration has been tracked.
    pub fn is_preprocessing(&self) -> bool {
        self.mode == Mode::Preprocessing
    }

    fn track_declaration(&mut self, current: &Utf8Path) -> Result<Depth, TrackError> {
        if self.mode == Mode::Preprocessing {
            self.mode = Mode::Declarations;
            if self.origins().is_empty() {
                // No #include at all: this is the root file.
                debug!("no includes seen, {current} is the root");
                self.pending = None;
                self.origins_mut().merge(current, Origin::TOP);
                return Ok(1);
            }
            self.dump_origins();
        }

        // A header whose first cursor is a declaration has not been entered yet.
        if self.pending.is_some() && self.is_expected(current) {
            let index = self.stack_index(current);
            if let Some(pending) = self.pending.take() {
                self.enter(current, index, pending)?;
            }
        }

        self.depth_of(current).ok_or_else(|| TrackError::MissingOrigin {
            path: current.to_owned(),
        })
    }

    /// Makes `current` the top of the inclusion stack, settling the pending
    /// `#include` on the way.
    fn reconcile_stack(&mut self, current: &Utf8Path) -> Result<(), TrackError> {
        let index = self.stack_index(current);

        if let Some(pending) = self.pending.take() {
            if self.is_expected(current) {
                self.enter(current, index, pending)?;
            } else {
                // The included file produced no cursor, we are back in the parent.
                debug!("expecting {}, but got {current}", self.expected_file);
                match self.real_paths.get(&self.expected_file) {
                    Some(real) => {
                        self.origins_mut().merge(real, pending);
                    }
                    None => debug!("unknown real path for include {}", self.expected_file),
                }
            }
        }

        if let Some(index) = index {
            if index + 1 < self.stack.len() {
                self.stack.truncate(index + 1);
                debug!("roll back stack to {current}");
                self.dump_stack();
            }
        }
        Ok(())
    }

    /// Enters the file a pending `#include` named. `index` is where the file
    /// already sits on the stack, if it is still open.
    fn enter(
        &mut self,
        current: &Utf8Path,
        index: Option<usize>,
        pending: Origin,
    ) -> Result<(), TrackError> {
        let Some(index) = index else {
            self.stack.push(current.to_owned());
            self.real_paths
                .insert(self.expected_file.clone(), current.to_owned());
            self.origins_mut().merge(current, pending);
            return Ok(());
        };

        // Circular inclusion. Whatever the file declares again is deeper than
        // what it declared the first time, so the pending origin is dropped.
        debug!("circular inclusion of {current} detected");
        self.dump_stack();
        self.dump_origins();
        let recorded = self
            .origins()
            .get(current)
            .map(Origin::depth)
            .ok_or_else(|| TrackError::MissingOrigin {
                path: current.to_owned(),
            })?;
        if recorded != index {
            return Err(TrackError::CircularDepthMismatch {
                path: current.to_owned(),
                recorded,
                expected: index,
            });
        }
        Ok(())
    }

    fn is_expected(&self, current: &Utf8Path) -> bool {
        self.config
            .path_matching
            .matches(current, &self.expected_file)
    }

    fn stack_index(&self, path: &Utf8Path) -> Option<usize> {
        self.stack.iter().position(|open| open == path)
    }

    fn origins(&self) -> RwLockReadGuard<'_, OriginTable> {
        self.origins.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn origins_mut(&self) -> RwLockWriteGuard<'_, OriginTable> {
        self.origins.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn dump_stack(&self) {
        if !self.config.dump_state || !log_enabled!(Level::Trace) {
            return;
        }
        let mut out = format!("include: {}\n", self.expected_file);
        let height = self.stack.len();
        for (index, path) in self.stack.iter().enumerate().rev() {
            let indent = height - index - 1;
            out.push_str(&format!("{:indent$}{path}\n", ""));
        }
        trace!("{out}");
    }

    fn dump_origins(&self) {
        if self.config.dump_state && log_enabled!(Level::Trace) {
            trace!("{}", self.origins().render());
        }
    }
}
