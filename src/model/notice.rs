use std::fmt;

/// Severity of a transient notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::Success => write!(f, "success"),
            NoticeKind::Info => write!(f, "info"),
            NoticeKind::Error => write!(f, "error"),
        }
    }
}

/// A short user-facing message: outcome of a load, save, or similar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub desc: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, desc: impl Into<String>) -> Self {
        Notice {
            kind,
            title: title.into(),
            desc: desc.into(),
        }
    }

    pub fn success(title: impl Into<String>, desc: impl Into<String>) -> Self {
        Notice::new(NoticeKind::Success, title, desc)
    }

    pub fn info(title: impl Into<String>, desc: impl Into<String>) -> Self {
        Notice::new(NoticeKind::Info, title, desc)
    }

    pub fn error(title: impl Into<String>, desc: impl Into<String>) -> Self {
        Notice::new(NoticeKind::Error, title, desc)
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
