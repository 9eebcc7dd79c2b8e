//! Dynamic GPU buffer management with automatic resizing
//!
//! Provides buffers that grow automatically when data exceeds capacity,
//! using a 2x growth strategy to minimize reallocations.

/// Minimum allocation in bytes.
const MIN_CAPACITY: usize = 64;

/// Capacity to reallocate to when `needed` bytes do not fit in `current`.
///
/// 2x growth, and at least 1 KiB more than before.
#[must_use]
pub fn grown_capacity(needed: usize, current: usize) -> usize {
    (needed * 2).max(current + 1024)
}

/// A GPU buffer that can grow dynamically
///
/// Uses a 2x growth strategy when capacity is exceeded.
/// Never shrinks (GPU buffers cannot be resized in place).
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Buffer with the given initial byte capacity.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(MIN_CAPACITY);
        Self {
            buffer: Self::allocate(device, label, capacity, usage),
            capacity,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Write typed data to the buffer, growing if necessary.
    ///
    /// Returns `true` if buffer was reallocated (bind groups need recreation)
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        self.write_bytes(device, queue, bytemuck::cast_slice(data))
    }

    /// Write raw bytes to buffer, growing if necessary.
    ///
    /// Returns `true` if buffer was reallocated (bind groups need recreation).
    pub fn write_bytes(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
    ) -> bool {
        let needed = data.len();
        let reallocated = needed > self.capacity;
        if reallocated {
            let new_capacity = grown_capacity(needed, self.capacity);
            log::debug!(
                "{}: growing {} -> {} bytes",
                self.label,
                self.capacity,
                new_capacity
            );
            self.buffer = Self::allocate(
                device,
                &self.label,
                new_capacity,
                self.usage,
            );
            self.capacity = new_capacity;
        }
        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, data);
        }
        self.len = needed;
        reallocated
    }

    /// The underlying buffer (replaced on growth).
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bytes written by the last write.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated size in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_doubles_needed() {
        assert_eq!(grown_capacity(4096, 1024), 8192);
    }

    #[test]
    fn growth_adds_at_least_a_kilobyte() {
        assert_eq!(grown_capacity(65, 64), 64 + 1024);
    }
}
