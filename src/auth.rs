//! Access Gate
//!
//! Optional bearer-token check guarding the PUT write path.

/// Bearer-token gate. Disabled when no credential is configured.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    credential: Option<String>,
}

impl AccessGate {
    /// Creates a gate for the given credential. An empty credential disables it.
    pub fn new(credential: Option<String>) -> Self {
        Self {
            credential: credential.filter(|c| !c.is_empty()),
        }
    }

    /// True iff a credential is configured.
    pub fn is_enabled(&self) -> bool {
        self.credential.is_some()
    }

    /// Checks an `Authorization` header value against the credential.
    ///
    /// The header is split on the literal `Bearer`; it must yield exactly two
    /// segments with nothing but whitespace before the marker. The trimmed
    /// remainder is the token. `Bearer<token>` without a space is accepted.
    /// A disabled gate authorizes nothing.
    pub fn authorize(&self, header: &str) -> bool {
        let Some(credential) = self.credential.as_deref() else {
            return false;
        };

        let segments: Vec<&str> = header.split("Bearer").collect();
        if segments.len() != 2 || !segments[0].trim().is_empty() {
            return false;
        }

        let token = segments[1].trim();
        !token.is_empty() && constant_time_eq(token.as_bytes(), credential.as_bytes())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
