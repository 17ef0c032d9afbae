use std::fmt;

/// Reserved `nextId` that opens a WhatsApp deep link.
pub const WHATSAPP_SENTINEL: &str = "whatsapp_action";
/// Prefix of the reserved `nextId` that navigates the host site to a path.
pub const OPEN_PREFIX: &str = "open:";

/// Where an option leads, resolved once against the set of known step ids.
///
/// The wire format stores this as a plain string. Resolution happens at the
/// graph boundary (loading, deleting a step, cleaning) so the navigator only
/// ever matches over this closed set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// Another step in the same graph.
    Step(String),
    /// The `whatsapp_action` sentinel.
    WhatsApp,
    /// The `open:<path>` sentinel.
    OpenPath(String),
    /// A reference to a step that does not exist (or an empty reference).
    Dangling(String),
}

impl Target {
    /// Resolves a raw `nextId` string. `exists` reports whether a step id is known.
    pub fn resolve(raw: &str, exists: impl Fn(&str) -> bool) -> Self {
        if raw == WHATSAPP_SENTINEL {
            return Target::WhatsApp;
        }
        if let Some(path) = raw.strip_prefix(OPEN_PREFIX) {
            if !path.trim().is_empty() {
                return Target::OpenPath(path.to_string());
            }
            return Target::Dangling(raw.to_string());
        }
        if !raw.trim().is_empty() && exists(raw) {
            Target::Step(raw.to_string())
        } else {
            Target::Dangling(raw.to_string())
        }
    }

    /// Re-resolves a step reference after the set of step ids changed.
    /// Sentinels are left as they are.
    pub fn refresh(&self, exists: impl Fn(&str) -> bool) -> Self {
        match self {
            Target::Step(id) | Target::Dangling(id) => Self::resolve(id, exists),
            sentinel => sentinel.clone(),
        }
    }

    /// The string this target is stored as on the wire.
    pub fn raw(&self) -> String {
        match self {
            Target::Step(id) | Target::Dangling(id) => id.clone(),
            Target::WhatsApp => WHATSAPP_SENTINEL.to_string(),
            Target::OpenPath(path) => format!("{}{}", OPEN_PREFIX, path),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Target::WhatsApp | Target::OpenPath(_))
    }

    pub fn is_dangling(&self) -> bool {
        matches!(self, Target::Dangling(_))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Step(id) => write!(f, "-> {}", id),
            Target::WhatsApp => write!(f, "[whatsapp]"),
            Target::OpenPath(path) => write!(f, "[open {}]", path),
            Target::Dangling(raw) => write!(f, "-> {} (missing)", raw),
        }
    }
}
