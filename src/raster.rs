//! TIFF raster reading and writing.
//!
//! Grey, RGB and RGBA images with 8 or 16 bit samples, and single band 32 or
//! 64 bit float rasters, are supported. Pixel-interleaved data is split into
//! one grid per band on read and merged again on write.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use ndarray::Array2;
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{TiffEncoder, colortype};

use crate::channels::{difference, fill_channels, merge_channels, split_channels};
use crate::error::{FloodError, RasterError};
use crate::flood::{FloodParams, FloodStats, find_pits};
use crate::grid::{Connectivity, Elevation};

/// One or more equally shaped bands of the same sample type.
#[derive(Debug, Clone, PartialEq)]
pub struct Bands<T> {
    bands: Vec<Array2<T>>,
}

impl<T: Elevation> Bands<T> {
    pub fn new(bands: Vec<Array2<T>>) -> Result<Self, RasterError> {
        let Some(first) = bands.first() else {
            return Err(RasterError::BandMismatch("no bands".to_string()));
        };
        let shape = first.dim();
        if shape.0 == 0 || shape.1 == 0 {
            return Err(FloodError::InvalidDimensions {
                rows: shape.0,
                cols: shape.1,
                reason: "raster is empty".to_string(),
            }
            .into());
        }
        if bands.iter().any(|b| b.dim() != shape) {
            return Err(RasterError::BandMismatch(
                "bands differ in shape".to_string(),
            ));
        }
        Ok(Bands { bands })
    }

    fn from_interleaved(data: &[T], rows: usize, cols: usize, channels: usize) -> Result<Self, RasterError> {
        Bands::new(split_channels(data, rows, cols, channels)?)
    }

    pub fn bands(&self) -> &[Array2<T>] {
        &self.bands
    }

    pub fn into_bands(self) -> Vec<Array2<T>> {
        self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Never true: construction rejects an empty band list.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// `(rows, cols)` shared by every band.
    pub fn shape(&self) -> (usize, usize) {
        self.bands[0].dim()
    }

    pub fn fill_depressions(&mut self, params: &FloodParams) -> Result<Vec<FloodStats>, FloodError> {
        fill_channels(&mut self.bands, params)
    }

    /// Band-wise `self - original`.
    pub fn difference(&self, original: &Bands<T>) -> Result<Bands<T>, RasterError> {
        if self.len() != original.len() {
            return Err(RasterError::BandMismatch(format!(
                "{} bands against {}",
                self.len(),
                original.len()
            )));
        }
        let diffs = self
            .bands
            .iter()
            .zip(&original.bands)
            .map(|(f, o)| difference(f.view(), o.view()))
            .collect::<Result<Vec<_>, _>>()?;
        Bands::new(diffs)
    }

    /// Number of pits in each band.
    pub fn count_pits(&self, connectivity: Connectivity) -> Vec<usize> {
        self.bands
            .iter()
            .map(|b| find_pits(b.view(), connectivity).len())
            .collect()
    }
}

/// A decoded raster, tagged by sample type.
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    U8(Bands<u8>),
    U16(Bands<u16>),
    F32(Bands<f32>),
    F64(Bands<f64>),
}

macro_rules! each_raster {
    ($raster:expr, $bands:ident => $body:expr) => {
        match $raster {
            Raster::U8($bands) => $body,
            Raster::U16($bands) => $body,
            Raster::F32($bands) => $body,
            Raster::F64($bands) => $body,
        }
    };
}

impl Raster {
    pub fn shape(&self) -> (usize, usize) {
        each_raster!(self, b => b.shape())
    }

    pub fn band_count(&self) -> usize {
        each_raster!(self, b => b.len())
    }

    pub fn sample_type(&self) -> &'static str {
        match self {
            Raster::U8(_) => "u8",
            Raster::U16(_) => "u16",
            Raster::F32(_) => "f32",
            Raster::F64(_) => "f64",
        }
    }

    /// Fills every band in place, one parallel traversal per band.
    pub fn fill_depressions(&mut self, params: &FloodParams) -> Result<Vec<FloodStats>, RasterError> {
        Ok(each_raster!(self, b => b.fill_depressions(params))?)
    }

    /// Band-wise `self - original`. Both rasters must share sample type.
    pub fn difference(&self, original: &Raster) -> Result<Raster, RasterError> {
        match (self, original) {
            (Raster::U8(f), Raster::U8(o)) => Ok(Raster::U8(f.difference(o)?)),
            (Raster::U16(f), Raster::U16(o)) => Ok(Raster::U16(f.difference(o)?)),
            (Raster::F32(f), Raster::F32(o)) => Ok(Raster::F32(f.difference(o)?)),
            (Raster::F64(f), Raster::F64(o)) => Ok(Raster::F64(f.difference(o)?)),
            _ => Err(RasterError::BandMismatch(format!(
                "sample types {} and {} differ",
                self.sample_type(),
                original.sample_type()
            ))),
        }
    }

    pub fn count_pits(&self, connectivity: Connectivity) -> Vec<usize> {
        each_raster!(self, b => b.count_pits(connectivity))
    }
}

/// Reads a TIFF file.
pub fn read_raster<P: AsRef<Path>>(path: P) -> Result<Raster, RasterError> {
    let file = File::open(path.as_ref())?;
    decode_raster(BufReader::new(file))
}

/// Decodes a TIFF from any seekable source.
pub fn decode_raster<R: Read + Seek>(reader: R) -> Result<Raster, RasterError> {
    let mut decoder = Decoder::new(reader)?;
    let (width, height) = decoder.dimensions()?;
    let (rows, cols) = (height as usize, width as usize);

    let channels = match decoder.colortype()? {
        ColorType::Gray(8 | 16 | 32 | 64) => 1,
        ColorType::RGB(8 | 16) => 3,
        ColorType::RGBA(8 | 16) => 4,
        other => {
            return Err(RasterError::UnsupportedLayout(format!("colour type {:?}", other)));
        }
    };

    let raster = match decoder.read_image()? {
        DecodingResult::U8(buf) => Raster::U8(Bands::from_interleaved(&buf, rows, cols, channels)?),
        DecodingResult::U16(buf) => Raster::U16(Bands::from_interleaved(&buf, rows, cols, channels)?),
        DecodingResult::F32(buf) => Raster::F32(Bands::from_interleaved(&buf, rows, cols, channels)?),
        DecodingResult::F64(buf) => Raster::F64(Bands::from_interleaved(&buf, rows, cols, channels)?),
        _ => {
            return Err(RasterError::UnsupportedLayout(
                "sample format is not u8, u16, f32 or f64".to_string(),
            ));
        }
    };
    Ok(raster)
}

/// Writes a raster as an uncompressed TIFF file.
pub fn write_raster<P: AsRef<Path>>(path: P, raster: &Raster) -> Result<(), RasterError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    encode_raster(&mut writer, raster)?;
    writer.flush()?;
    Ok(())
}

/// Encodes a raster as TIFF into any seekable sink.
pub fn encode_raster<W: Write + Seek>(writer: W, raster: &Raster) -> Result<(), RasterError> {
    let mut encoder = TiffEncoder::new(writer)?;
    let (rows, cols) = raster.shape();
    let width = u32::try_from(cols).map_err(|_| too_large(rows, cols))?;
    let height = u32::try_from(rows).map_err(|_| too_large(rows, cols))?;

    match raster {
        Raster::U8(b) => {
            let data = merge_channels(b.bands())?;
            match b.len() {
                1 => encoder.write_image::<colortype::Gray8>(width, height, &data)?,
                3 => encoder.write_image::<colortype::RGB8>(width, height, &data)?,
                4 => encoder.write_image::<colortype::RGBA8>(width, height, &data)?,
                n => return Err(unsupported_bands(n, "u8")),
            }
        }
        Raster::U16(b) => {
            let data = merge_channels(b.bands())?;
            match b.len() {
                1 => encoder.write_image::<colortype::Gray16>(width, height, &data)?,
                3 => encoder.write_image::<colortype::RGB16>(width, height, &data)?,
                4 => encoder.write_image::<colortype::RGBA16>(width, height, &data)?,
                n => return Err(unsupported_bands(n, "u16")),
            }
        }
        Raster::F32(b) => match b.len() {
            1 => encoder.write_image::<colortype::Gray32Float>(width, height, &merge_channels(b.bands())?)?,
            n => return Err(unsupported_bands(n, "f32")),
        },
        Raster::F64(b) => match b.len() {
            1 => encoder.write_image::<colortype::Gray64Float>(width, height, &merge_channels(b.bands())?)?,
            n => return Err(unsupported_bands(n, "f64")),
        },
    }
    Ok(())
}

fn too_large(rows: usize, cols: usize) -> RasterError {
    RasterError::UnsupportedLayout(format!("{}x{} exceeds TIFF limits", rows, cols))
}

fn unsupported_bands(n: usize, sample: &str) -> RasterError {
    RasterError::BandMismatch(format!("cannot encode {} {} bands", n, sample))
}
