//! `GL_VERSION` string parsing.

/// API flavour and version of the current context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlVersion {
    pub es: bool,
    pub major: u32,
    pub minor: u32,
}

impl GlVersion {
    /// Assumed when the driver's version string cannot be parsed.
    pub const ES2: GlVersion = GlVersion {
        es: true,
        major: 2,
        minor: 0,
    };

    /// Parse `glGetString(GL_VERSION)`.
    ///
    /// Accepts `"OpenGL ES 3.2 V@415.0"`, `"OpenGL ES-CM 1.1"` and desktop
    /// strings such as `"4.6.0 NVIDIA 535.54"`.
    pub fn parse(version: &str) -> Option<Self> {
        let (es, rest) = match version.trim().strip_prefix("OpenGL ES") {
            Some(rest) => (true, rest.trim_start_matches(|c: char| !c.is_ascii_digit())),
            None => (false, version.trim()),
        };

        let number = rest.split_whitespace().next()?;
        let mut parts = number.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts
            .next()
            .and_then(|m| {
                let digits: String = m.chars().take_while(char::is_ascii_digit).collect();
                digits.parse().ok()
            })
            .unwrap_or(0);

        Some(Self { es, major, minor })
    }

    /// Whether `GL_PIXEL_PACK_BUFFER` exists (ES 3.0, desktop 2.1).
    pub fn has_pixel_pack_buffer(&self) -> bool {
        if self.es {
            self.major >= 3
        } else {
            (self.major, self.minor) >= (2, 1)
        }
    }
}
