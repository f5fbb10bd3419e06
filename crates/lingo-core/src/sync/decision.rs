//! Decision types shared by the pull and push planners

use lingo_fs::NormalizedPath;

/// Action to take for one language of one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Overwrite the local file with the remote translation
    Pull,
    /// Upload the local file, overwriting the remote translation
    Push,
    /// Download a translation that has no local file yet
    AddNew,
    /// Leave this language alone
    Skip,
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pull => "pull",
            Self::Push => "push",
            Self::AddNew => "add",
            Self::Skip => "skip",
        };
        write!(f, "{s}")
    }
}

/// One computed decision.
///
/// `language` is the remote code (the one used in URLs); `local_file` is
/// the root-relative path to act on, when one is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncDecision {
    pub language: String,
    pub action: SyncAction,
    pub local_file: Option<NormalizedPath>,
}

/// What the caller asked the planner to do.
#[derive(Debug, Clone, Default)]
pub struct Directive {
    /// Ignore timestamps and overwrite
    pub force: bool,
    /// Also fetch languages that have no local file yet
    pub fetch_all: bool,
    /// Collect per-language failures instead of aborting the run
    pub skip_errors: bool,
    /// Requested language codes; empty means all
    pub languages: Vec<String>,
    /// Per-call minimum completion override
    pub minimum_perc: Option<u8>,
}

impl Directive {
    /// Whether a language is covered by this directive.
    ///
    /// An empty request list covers everything. Users may spell a language
    /// with either its remote or its local code.
    pub fn covers(&self, remote: &str, local: &str) -> bool {
        self.languages.is_empty() || self.names(remote, local)
    }

    /// Whether a language was named explicitly.
    pub fn names(&self, remote: &str, local: &str) -> bool {
        self.languages.iter().any(|l| l == remote || l == local)
    }
}
