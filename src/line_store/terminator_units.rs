//! Conversion of a [`super::Terminator`] into the UTF-16 code units it represents, used by the
//! character iterator to walk across line boundaries as if the terminator were ordinary text.

use super::Terminator;

impl Terminator {
    /// The code units this terminator would occupy if it were written out explicitly.
    pub fn units(self) -> &'static [u16] {
        match self {
            Terminator::Lf => &[0x000A],
            Terminator::Cr => &[0x000D],
            Terminator::CrLf => &[0x000D, 0x000A],
            Terminator::Nel => &[0x0085],
            Terminator::Ls => &[0x2028],
            Terminator::Ps => &[0x2029],
            Terminator::None => &[],
        }
    }
}
