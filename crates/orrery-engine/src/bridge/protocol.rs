/// Frame buffer layout shared with the JS host.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 20 floats]
/// ```
///
/// The header carries camera state and the clear color so the host can
/// sync its own camera and background without extra calls; instances
/// describe every drawable node with its world transform baked in. The
/// host keeps persistent 3D objects keyed by node id, creating on first
/// sight and updating transforms on later frames.

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_INSTANCE_COUNT: usize = 2;
pub const HEADER_MAX_INSTANCES: usize = 3;
pub const HEADER_CLEAR_R: usize = 4;
pub const HEADER_CLEAR_G: usize = 5;
pub const HEADER_CLEAR_B: usize = 6;
pub const HEADER_CAMERA_X: usize = 7;
pub const HEADER_CAMERA_Y: usize = 8;
pub const HEADER_CAMERA_Z: usize = 9;
pub const HEADER_TARGET_X: usize = 10;
pub const HEADER_TARGET_Y: usize = 11;
pub const HEADER_TARGET_Z: usize = 12;
pub const HEADER_FOV_Y: usize = 13;
pub const HEADER_ASPECT: usize = 14;
pub const HEADER_RESERVED: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per instance (wire format — never changes).
pub const INSTANCE_FLOATS: usize = 20;

/// Instance kinds on the wire.
pub const KIND_MESH: f32 = 1.0;
pub const KIND_LINE: f32 = 2.0;
pub const KIND_AMBIENT_LIGHT: f32 = 3.0;
pub const KIND_POINT_LIGHT: f32 = 4.0;

/// Instance flag bits (packed into one f32).
pub const FLAG_TRANSPARENT: u32 = 1;
pub const FLAG_DOUBLE_SIDE: u32 = 1 << 1;
pub const FLAG_BACK_SIDE: u32 = 1 << 2;
pub const FLAG_UNLIT: u32 = 1 << 3;

/// Texture slot value meaning "no texture".
pub const NO_TEXTURE: f32 = -1.0;

/// Runtime-computed buffer layout for a given instance capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    /// Size of the instance section in floats.
    pub instance_data_floats: usize,
    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
}

impl ProtocolLayout {
    pub fn from_capacity(max_instances: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        Self {
            max_instances,
            instance_data_floats,
            buffer_total_floats: HEADER_FLOATS + instance_data_floats,
        }
    }

    /// Offset (in floats) of instance `index`.
    pub fn instance_offset(&self, index: usize) -> usize {
        HEADER_FLOATS + index * INSTANCE_FLOATS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_totals() {
        let layout = ProtocolLayout::from_capacity(64);
        assert_eq!(layout.instance_data_floats, 64 * INSTANCE_FLOATS);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 64 * INSTANCE_FLOATS);
    }

    #[test]
    fn instance_offsets_are_contiguous() {
        let layout = ProtocolLayout::from_capacity(8);
        assert_eq!(layout.instance_offset(0), HEADER_FLOATS);
        assert_eq!(
            layout.instance_offset(1) - layout.instance_offset(0),
            INSTANCE_FLOATS
        );
    }

    #[test]
    fn header_indices_fit_the_header() {
        assert!(HEADER_RESERVED < HEADER_FLOATS);
    }
}
