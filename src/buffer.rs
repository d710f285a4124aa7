use crate::Scalar;

/// Per-component storage format for binary buffer I/O.
///
/// The buffer layout carries no type tag or length prefix: the caller
/// owns positioning and must agree on the encoding at both ends.
/// Intended for GPU upload buffers and animation assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// IEEE-754 binary32, little-endian
    F32Le,
    /// IEEE-754 binary32, big-endian
    F32Be,
    /// IEEE-754 binary64, little-endian
    F64Le,
    /// IEEE-754 binary64, big-endian
    F64Be,
}

impl Encoding {
    /// Bytes per component
    #[inline]
    pub const fn width(self) -> usize {
        match self {
            Encoding::F32Le | Encoding::F32Be => 4,
            Encoding::F64Le | Encoding::F64Be => 8,
        }
    }
}

/// Write one scalar at byte offset `at`. Width conversion goes through
/// f64, so an f32 encoding of an f64 scalar rounds to nearest.
///
/// Panics if the buffer is too short (out-of-contract input).
pub fn write_scalar<S: Scalar>(enc: Encoding, buf: &mut [u8], at: usize, value: S) {
    match enc {
        Encoding::F32Le => {
            buf[at..at + 4].copy_from_slice(&(value.to_f64() as f32).to_le_bytes());
        }
        Encoding::F32Be => {
            buf[at..at + 4].copy_from_slice(&(value.to_f64() as f32).to_be_bytes());
        }
        Encoding::F64Le => {
            buf[at..at + 8].copy_from_slice(&value.to_f64().to_le_bytes());
        }
        Encoding::F64Be => {
            buf[at..at + 8].copy_from_slice(&value.to_f64().to_be_bytes());
        }
    }
}

/// Read one scalar from byte offset `at`.
///
/// Panics if the buffer is too short (out-of-contract input).
pub fn read_scalar<S: Scalar>(enc: Encoding, buf: &[u8], at: usize) -> S {
    let v = match enc {
        Encoding::F32Le => {
            f32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]) as f64
        }
        Encoding::F32Be => {
            f32::from_be_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]) as f64
        }
        Encoding::F64Le => f64::from_le_bytes([
            buf[at],
            buf[at + 1],
            buf[at + 2],
            buf[at + 3],
            buf[at + 4],
            buf[at + 5],
            buf[at + 6],
            buf[at + 7],
        ]),
        Encoding::F64Be => f64::from_be_bytes([
            buf[at],
            buf[at + 1],
            buf[at + 2],
            buf[at + 3],
            buf[at + 4],
            buf[at + 5],
            buf[at + 6],
            buf[at + 7],
        ]),
    };
    S::from_f64(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(Encoding::F32Le.width(), 4);
        assert_eq!(Encoding::F32Be.width(), 4);
        assert_eq!(Encoding::F64Le.width(), 8);
        assert_eq!(Encoding::F64Be.width(), 8);
    }

    #[test]
    fn f64_roundtrip_bit_exact() {
        let mut buf = [0u8; 16];
        let v = 0.1_f64; // not representable exactly; bits must survive
        write_scalar(Encoding::F64Le, &mut buf, 3, v);
        let back: f64 = read_scalar(Encoding::F64Le, &buf, 3);
        assert_eq!(v.to_bits(), back.to_bits());
    }

    #[test]
    fn f32_roundtrip_bit_exact() {
        let mut buf = [0u8; 8];
        let v = 0.1_f32;
        write_scalar(Encoding::F32Be, &mut buf, 0, v);
        let back: f32 = read_scalar(Encoding::F32Be, &buf, 0);
        assert_eq!(v.to_bits(), back.to_bits());
    }

    #[test]
    fn endianness_differs() {
        let mut le = [0u8; 8];
        let mut be = [0u8; 8];
        write_scalar(Encoding::F64Le, &mut le, 0, 1.5_f64);
        write_scalar(Encoding::F64Be, &mut be, 0, 1.5_f64);
        let mut rev = be;
        rev.reverse();
        assert_eq!(le, rev);
    }

    #[test]
    fn f32_encoding_of_f64_rounds() {
        let mut buf = [0u8; 4];
        write_scalar(Encoding::F32Le, &mut buf, 0, 0.1_f64);
        let back: f64 = read_scalar(Encoding::F32Le, &buf, 0);
        assert_eq!(back, 0.1_f32 as f64);
    }
}
