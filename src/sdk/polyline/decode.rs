use super::{scale_factor, Coordinate, CoordinateSequence, DecodeOptions, PolylineError, MAX_PRECISION};

const OFFSET: u8 = 63;
const CHUNK_MASK: u8 = 0x1f;
const CONTINUATION: u8 = 0x20;

/// Decodes a polyline at the default 1e-5 precision.
///
/// Never fails: an incomplete trailing value drops the point it belongs to and
/// the points completed before it are returned.
pub fn decode(encoded: &str) -> CoordinateSequence {
    decode_with(encoded, &DecodeOptions::default())
}

/// Lenient decode honouring `opts`. Over-long input is cut at
/// `max_input_len` bytes and output stops after `max_points` points.
pub fn decode_with(encoded: &str, opts: &DecodeOptions) -> CoordinateSequence {
    run(encoded, opts, false).unwrap_or_default()
}

/// Validating decode: any anomaly the lenient path would paper over is
/// reported as a [`PolylineError`].
pub fn decode_strict(
    encoded: &str,
    opts: &DecodeOptions,
) -> Result<CoordinateSequence, PolylineError> {
    run(encoded, opts, true)
}

enum Fault {
    Truncated,
    InvalidByte { offset: usize, byte: u8 },
    Overflow { offset: usize },
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Reads one zig-zag encoded value, least significant chunk first.
    fn read_value(&mut self, strict: bool) -> Result<i64, Fault> {
        let start = self.pos;
        let mut result: u64 = 0;
        let mut shift: u32 = 0;

        loop {
            let Some(&byte) = self.bytes.get(self.pos) else {
                return Err(Fault::Truncated);
            };
            if strict && !(OFFSET..=126).contains(&byte) {
                return Err(Fault::InvalidByte {
                    offset: self.pos,
                    byte,
                });
            }
            self.pos += 1;

            let chunk = byte.wrapping_sub(OFFSET);
            let bits = u64::from(chunk & CHUNK_MASK);
            // Bits past position 63 are dropped.
            let kept = if shift < 64 { bits << shift } else { 0 };
            if strict && bits != 0 && (shift >= 64 || kept >> shift != bits) {
                return Err(Fault::Overflow { offset: start });
            }
            result |= kept;
            shift = shift.saturating_add(5);

            if chunk & CONTINUATION == 0 {
                break;
            }
        }

        Ok(zigzag(result))
    }

    fn read_pair(&mut self, strict: bool) -> Result<(i64, i64), Fault> {
        let dlat = self.read_value(strict)?;
        let dlng = self.read_value(strict)?;
        Ok((dlat, dlng))
    }
}

fn zigzag(value: u64) -> i64 {
    if value & 1 == 1 {
        !(value >> 1) as i64
    } else {
        (value >> 1) as i64
    }
}

fn run(
    encoded: &str,
    opts: &DecodeOptions,
    strict: bool,
) -> Result<CoordinateSequence, PolylineError> {
    if strict && opts.precision > MAX_PRECISION {
        return Err(PolylineError::InvalidPrecision(opts.precision));
    }

    let mut bytes = encoded.as_bytes();
    if let Some(max) = opts.max_input_len {
        if bytes.len() > max {
            if strict {
                return Err(PolylineError::InputTooLong {
                    len: bytes.len(),
                    max,
                });
            }
            log::debug!(
                "Polyline of {} bytes cut to the {} byte limit",
                bytes.len(),
                max
            );
            bytes = &bytes[..max];
        }
    }

    let factor = scale_factor(opts.precision);
    let mut reader = Reader::new(bytes);
    let mut points = Vec::new();
    let (mut lat, mut lng) = (0i64, 0i64);

    while !reader.at_end() {
        if let Some(max) = opts.max_points {
            if !strict && points.len() >= max {
                log::debug!("Polyline decode stopped at the {} point limit", max);
                break;
            }
        }

        let point_start = reader.pos;
        match reader.read_pair(strict) {
            Ok((dlat, dlng)) => {
                if let Some(max) = opts.max_points {
                    if points.len() >= max {
                        return Err(PolylineError::TooManyPoints { max });
                    }
                }
                lat = lat.wrapping_add(dlat);
                lng = lng.wrapping_add(dlng);
                points.push(Coordinate::new(lat as f64 / factor, lng as f64 / factor));
            }
            Err(Fault::Truncated) => {
                if strict {
                    return Err(PolylineError::Truncated {
                        offset: point_start,
                        decoded: points.len(),
                    });
                }
                log::debug!(
                    "Polyline truncated at offset {}, keeping {} points",
                    point_start,
                    points.len()
                );
                break;
            }
            Err(Fault::InvalidByte { offset, byte }) => {
                return Err(PolylineError::InvalidByte { offset, byte });
            }
            Err(Fault::Overflow { offset }) => {
                return Err(PolylineError::Overflow { offset });
            }
        }
    }

    Ok(points)
}
