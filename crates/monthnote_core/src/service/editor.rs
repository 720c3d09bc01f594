//! Single-active-editor arbitration.
//!
//! # Responsibility
//! - Guarantee at most one note editor is open (dirty) at a time per client
//!   session by forcing a save-and-close of the previous editor before a new
//!   one may open.
//!
//! # Invariants
//! - A failed save keeps the previous editor open and its content intact;
//!   the blocked caller gets `false`, never a panic.
//! - `close_editor` always returns to `Idle`, regardless of current owner.

use log::{debug, warn};

/// Save callback invoked when another editor requests to open.
///
/// The error string is surfaced only to logging; callers learn about
/// failure through `request_open` returning `false`.
pub type SaveFn = Box<dyn FnMut() -> Result<(), String>>;

enum EditorState {
    Idle,
    Editing { owner: String, save: SaveFn },
}

/// State machine serializing local editor mutations.
///
/// One instance exists per active client session; no other global mutable
/// state is needed.
pub struct EditorArbitrator {
    state: EditorState,
}

impl Default for EditorArbitrator {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorArbitrator {
    pub fn new() -> Self {
        Self {
            state: EditorState::Idle,
        }
    }

    /// Requests to open the editor identified by `id`.
    ///
    /// - Already editing `id`: no-op success; the original save callback is
    ///   kept.
    /// - Editing another id: its save callback runs first. On success the
    ///   arbitration transfers to `id`; on failure the previous editor stays
    ///   open and the caller must not open.
    /// - Idle: transitions directly to editing `id`.
    pub fn request_open(&mut self, id: impl Into<String>, save: SaveFn) -> bool {
        let id = id.into();
        match std::mem::replace(&mut self.state, EditorState::Idle) {
            EditorState::Idle => {
                debug!("event=editor_open module=editor status=ok owner={id} previous=none");
                self.state = EditorState::Editing { owner: id, save };
                true
            }
            EditorState::Editing {
                owner,
                save: existing,
            } if owner == id => {
                debug!("event=editor_open module=editor status=ok owner={id} previous=self");
                self.state = EditorState::Editing {
                    owner,
                    save: existing,
                };
                true
            }
            EditorState::Editing {
                owner: previous,
                save: mut pending_save,
            } => match pending_save() {
                Ok(()) => {
                    debug!(
                        "event=editor_open module=editor status=ok owner={id} previous={previous}"
                    );
                    self.state = EditorState::Editing { owner: id, save };
                    true
                }
                Err(reason) => {
                    warn!(
                        "event=editor_open module=editor status=blocked owner={id} previous={previous} error={reason}"
                    );
                    self.state = EditorState::Editing {
                        owner: previous,
                        save: pending_save,
                    };
                    false
                }
            },
        }
    }

    /// Closes whatever editor is open, discarding its save callback.
    pub fn close_editor(&mut self) {
        if let EditorState::Editing { owner, .. } = &self.state {
            debug!("event=editor_close module=editor status=ok owner={owner}");
        }
        self.state = EditorState::Idle;
    }

    /// Returns the id of the currently open editor, if any.
    pub fn active_editor(&self) -> Option<&str> {
        match &self.state {
            EditorState::Idle => None,
            EditorState::Editing { owner, .. } => Some(owner),
        }
    }
}
