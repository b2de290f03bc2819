extern crate num_traits;

use std::collections::TryReserveError;
use num_traits::ToPrimitive;
use serde::{Serialize, Deserialize};
use crate::{Float,DESCRIPTOR_LENGTH,DESCRIPTOR_SCALE};

/// Storage chosen once per extraction run
#[derive(Debug,Copy,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub enum DescriptorMode {
    /// Scaled by 512, clamped to 255 and truncated to a byte
    Quantized,
    /// Scaled by 512, not clamped
    Float
}

impl Default for DescriptorMode {
    fn default() -> DescriptorMode {
        DescriptorMode::Quantized
    }
}

/// Rows of descriptors in the representation selected by `DescriptorMode`
#[derive(Debug,Clone,PartialEq)]
pub enum Descriptors {
    Quantized(Vec<[u8; DESCRIPTOR_LENGTH]>),
    Float(Vec<[f32; DESCRIPTOR_LENGTH]>)
}

impl Descriptors {

    pub fn new(mode: DescriptorMode) -> Descriptors {
        match mode {
            DescriptorMode::Quantized => Descriptors::Quantized(Vec::new()),
            DescriptorMode::Float => Descriptors::Float(Vec::new())
        }
    }

    pub fn mode(&self) -> DescriptorMode {
        match self {
            Descriptors::Quantized(_) => DescriptorMode::Quantized,
            Descriptors::Float(_) => DescriptorMode::Float
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Descriptors::Quantized(rows) => rows.len(),
            Descriptors::Float(rows) => rows.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        match self {
            Descriptors::Quantized(rows) => rows.capacity(),
            Descriptors::Float(rows) => rows.capacity()
        }
    }

    /// Makes room for `total` rows. Never shrinks.
    pub fn try_reserve_total(&mut self, total: usize) -> Result<(), TryReserveError> {
        match self {
            Descriptors::Quantized(rows) => rows.try_reserve_exact(total.saturating_sub(rows.len())),
            Descriptors::Float(rows) => rows.try_reserve_exact(total.saturating_sub(rows.len()))
        }
    }

    pub fn push(&mut self, raw: &[Float; DESCRIPTOR_LENGTH]) -> () {
        match self {
            Descriptors::Quantized(rows) => rows.push(quantize(raw)),
            Descriptors::Float(rows) => rows.push(scale(raw))
        }
    }

    pub fn shrink_to_fit(&mut self) -> () {
        match self {
            Descriptors::Quantized(rows) => rows.shrink_to_fit(),
            Descriptors::Float(rows) => rows.shrink_to_fit()
        }
    }

    pub fn as_quantized(&self) -> Option<&[[u8; DESCRIPTOR_LENGTH]]> {
        match self {
            Descriptors::Quantized(rows) => Some(rows.as_slice()),
            Descriptors::Float(_) => None
        }
    }

    pub fn as_float(&self) -> Option<&[[f32; DESCRIPTOR_LENGTH]]> {
        match self {
            Descriptors::Quantized(_) => None,
            Descriptors::Float(rows) => Some(rows.as_slice())
        }
    }
}

pub fn quantize(raw: &[Float; DESCRIPTOR_LENGTH]) -> [u8; DESCRIPTOR_LENGTH] {
    let mut data = [0u8; DESCRIPTOR_LENGTH];
    for (quantized,&value) in data.iter_mut().zip(raw.iter()) {
        let saturated_value = (DESCRIPTOR_SCALE*value).min(255.0);
        *quantized = saturated_value.to_u8().unwrap_or(0);
    }
    data
}

pub fn scale(raw: &[Float; DESCRIPTOR_LENGTH]) -> [f32; DESCRIPTOR_LENGTH] {
    let mut data = [0f32; DESCRIPTOR_LENGTH];
    for (scaled,&value) in data.iter_mut().zip(raw.iter()) {
        *scaled = (DESCRIPTOR_SCALE*value) as f32;
    }
    data
}
