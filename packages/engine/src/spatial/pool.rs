//! PipePool - flat arena of pipe records
//!
//! Instead of: Vec<Pipe>            // one struct per pipe
//! We have:    props[slot * 8 + k]  // one homogeneous f32 buffer, JS can view it directly
//!
//! The pool never grows or shrinks. Dead pipes are respawned in place.

use crate::domain::pipe::{Pipe, PIPE_PROP_COUNT};

pub struct PipePool {
    count: usize,
    props: Vec<f32>,
}

impl PipePool {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            props: vec![0.0; count * PIPE_PROP_COUNT],
        }
    }

    #[inline]
    pub fn count(&self) -> usize { self.count }

    #[inline]
    pub fn len(&self) -> usize { self.props.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.count == 0 }

    #[inline(always)]
    fn offset(slot: usize, prop: usize) -> usize {
        slot * PIPE_PROP_COUNT + prop
    }

    #[inline]
    pub fn get(&self, slot: usize, prop: usize) -> f32 {
        debug_assert!(slot < self.count && prop < PIPE_PROP_COUNT);
        *fast!(self.props, [Self::offset(slot, prop)])
    }

    #[inline]
    pub fn set(&mut self, slot: usize, prop: usize, value: f32) {
        debug_assert!(slot < self.count && prop < PIPE_PROP_COUNT);
        fast!(self.props, [Self::offset(slot, prop)] = value);
    }

    /// Copy out the whole record for `slot`. Panics if `slot >= count`.
    pub fn read(&self, slot: usize) -> Pipe {
        let start = slot * PIPE_PROP_COUNT;
        Pipe::from_props(&self.props[start..start + PIPE_PROP_COUNT])
    }

    /// Overwrite the whole record for `slot`. Panics if `slot >= count`.
    pub fn write(&mut self, slot: usize, pipe: &Pipe) {
        let start = slot * PIPE_PROP_COUNT;
        self.props[start..start + PIPE_PROP_COUNT].copy_from_slice(&pipe.to_props());
    }

    pub fn iter(&self) -> impl Iterator<Item = Pipe> + '_ {
        self.props.chunks_exact(PIPE_PROP_COUNT).map(Pipe::from_props)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.props
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.props.as_ptr()
    }
}
