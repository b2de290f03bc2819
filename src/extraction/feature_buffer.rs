use log::debug;
use crate::{Float,DESCRIPTOR_LENGTH};
use crate::error::Result;
use crate::descriptor::feature_vector::{DescriptorMode,Descriptors};
use crate::extraction::frame::Frame;

/// Frames and descriptors kept co-indexed while an extraction runs.
///
/// Room is added in steps of twice the keypoint count of the octave being processed,
/// only when the next commit would not fit.
#[derive(Debug,Clone)]
pub struct FeatureBuffer {
    frames: Vec<Frame>,
    descriptors: Descriptors,
    reserved: usize
}

impl FeatureBuffer {

    pub fn new(mode: DescriptorMode) -> FeatureBuffer {
        FeatureBuffer {
            frames: Vec::new(),
            descriptors: Descriptors::new(mode),
            reserved: 0
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn reserved(&self) -> usize {
        self.reserved
    }

    fn ensure_room(&mut self, octave_keypoints: usize) -> Result<()> {
        if self.reserved < self.len() + 1 {
            let reserved = self.reserved + 2*octave_keypoints.max(1);
            self.frames.try_reserve_exact(reserved - self.frames.len())?;
            self.descriptors.try_reserve_total(reserved)?;
            self.reserved = reserved;
            debug!("reserved room for {} descriptors", reserved);
        }
        Ok(())
    }

    /// Appends one frame and its descriptor. Nothing is written when growing fails.
    pub fn commit(&mut self, frame: Frame, descriptor: &[Float; DESCRIPTOR_LENGTH], octave_keypoints: usize) -> Result<()> {
        self.ensure_room(octave_keypoints)?;
        self.frames.push(frame);
        self.descriptors.push(descriptor);
        debug_assert_eq!(self.frames.len(), self.descriptors.len());
        Ok(())
    }

    /// Releases unused room and hands the committed rows out
    pub fn into_parts(mut self) -> (Vec<Frame>,Descriptors) {
        self.frames.shrink_to_fit();
        self.descriptors.shrink_to_fit();
        (self.frames,self.descriptors)
    }
}
