use colored::Colorize;
use rustfft::num_complex::Complex64;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use crate::error::UflResult;

const BUFFER_SIZE: usize = 128 * 1024;

/// Layout of an interleaved little-endian IQ file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IQFileType {
    TypePairFloat64,
    TypePairFloat32,
    TypePairInt16,
    TypePairInt8,
}

impl IQFileType {
    pub fn bytes_per_sample(&self) -> usize {
        match *self {
            IQFileType::TypePairFloat64 => 16,
            IQFileType::TypePairFloat32 => 8,
            IQFileType::TypePairInt16 => 4,
            IQFileType::TypePairInt8 => 2,
        }
    }

    fn decode(&self, b: &[u8]) -> Complex64 {
        match *self {
            IQFileType::TypePairFloat64 => {
                let mut i = [0u8; 8];
                let mut q = [0u8; 8];
                i.copy_from_slice(&b[0..8]);
                q.copy_from_slice(&b[8..16]);
                Complex64::new(f64::from_le_bytes(i), f64::from_le_bytes(q))
            }
            IQFileType::TypePairFloat32 => {
                let i = f32::from_le_bytes([b[0], b[1], b[2], b[3]]);
                let q = f32::from_le_bytes([b[4], b[5], b[6], b[7]]);
                Complex64::new(i as f64, q as f64)
            }
            IQFileType::TypePairInt16 => {
                let i = i16::from_le_bytes([b[0], b[1]]);
                let q = i16::from_le_bytes([b[2], b[3]]);
                Complex64::new(i as f64 / i16::MAX as f64, q as f64 / i16::MAX as f64)
            }
            IQFileType::TypePairInt8 => Complex64::new(
                b[0] as i8 as f64 / i8::MAX as f64,
                b[1] as i8 as f64 / i8::MAX as f64,
            ),
        }
    }

    fn encode(&self, c: Complex64, buf: &mut Vec<u8>) {
        match *self {
            IQFileType::TypePairFloat64 => {
                buf.extend_from_slice(&c.re.to_le_bytes());
                buf.extend_from_slice(&c.im.to_le_bytes());
            }
            IQFileType::TypePairFloat32 => {
                buf.extend_from_slice(&(c.re as f32).to_le_bytes());
                buf.extend_from_slice(&(c.im as f32).to_le_bytes());
            }
            IQFileType::TypePairInt16 => {
                let scale = |x: f64| (x * i16::MAX as f64).round() as i16;
                buf.extend_from_slice(&scale(c.re).to_le_bytes());
                buf.extend_from_slice(&scale(c.im).to_le_bytes());
            }
            IQFileType::TypePairInt8 => {
                let scale = |x: f64| (x * i8::MAX as f64).round() as i8;
                buf.extend_from_slice(&scale(c.re).to_le_bytes());
                buf.extend_from_slice(&scale(c.im).to_le_bytes());
            }
        }
    }
}

impl FromStr for IQFileType {
    type Err = Box<dyn Error>;
    fn from_str(input: &str) -> Result<IQFileType, Self::Err> {
        match input {
            "2xf64" => Ok(IQFileType::TypePairFloat64),
            "2xf32" => Ok(IQFileType::TypePairFloat32),
            "2xi16" => Ok(IQFileType::TypePairInt16),
            "2xi8" => Ok(IQFileType::TypePairInt8),
            _ => Err(format!("Failed to parse {}", input).into()),
        }
    }
}

impl fmt::Display for IQFileType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            IQFileType::TypePairFloat64 => write!(f, "2xf64"),
            IQFileType::TypePairFloat32 => write!(f, "2xf32"),
            IQFileType::TypePairInt16 => write!(f, "2xi16"),
            IQFileType::TypePairInt8 => write!(f, "2xi8"),
        }
    }
}

pub struct IQFile {
    pub file_path: PathBuf,
    pub file_type: IQFileType,
}

impl IQFile {
    pub fn new(file_path: PathBuf, file_type: IQFileType) -> Self {
        Self {
            file_path,
            file_type,
        }
    }

    /// Reads every sample of the file. Integer formats are scaled to [-1, 1].
    pub fn read_iq_file(&self) -> UflResult<Vec<Complex64>> {
        let file = File::open(&self.file_path)?;
        let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
        let ts = Instant::now();

        let mut buf = vec![];
        reader.read_to_end(&mut buf)?;

        let width = self.file_type.bytes_per_sample();
        if buf.len() % width != 0 {
            return Err(std::io::Error::new(
                ErrorKind::InvalidData,
                format!(
                    "{}: size {} is not a multiple of {} ({})",
                    self.file_path.display(),
                    buf.len(),
                    width,
                    self.file_type
                ),
            )
            .into());
        }
        let iq_vec: Vec<Complex64> = buf
            .chunks_exact(width)
            .map(|b| self.file_type.decode(b))
            .collect();

        log::info!(
            "read {}: num_samples: {} -- {} usec",
            self.file_path.display(),
            format!("{}", iq_vec.len()).yellow(),
            ts.elapsed().as_micros(),
        );
        Ok(iq_vec)
    }

    pub fn write_iq_file(&self, iq_vec: &[Complex64]) -> UflResult<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::with_capacity(BUFFER_SIZE, file);
        let mut buf = Vec::with_capacity(iq_vec.len() * self.file_type.bytes_per_sample());
        for &c in iq_vec {
            self.file_type.encode(c, &mut buf);
        }
        writer.write_all(&buf)?;
        writer.flush()?;
        log::info!(
            "wrote {}: num_samples: {} ({})",
            self.file_path.display(),
            format!("{}", iq_vec.len()).yellow(),
            self.file_type
        );
        Ok(())
    }
}
