use std::mem::size_of;

use wgpu::{VertexAttribute, VertexFormat};

use super::{AttributeKind, GeometryData, GeometryGroup};

const POSITION_ATTRIBUTES: [VertexAttribute; 1] = [VertexAttribute {
    format: VertexFormat::Float32x3,
    offset: 0,
    shader_location: 0,
}];

const TEXCOORD_ATTRIBUTES: [VertexAttribute; 1] = [VertexAttribute {
    format: VertexFormat::Float32x2,
    offset: 0,
    shader_location: 1,
}];

const NORMAL_ATTRIBUTES: [VertexAttribute; 1] = [VertexAttribute {
    format: VertexFormat::Float32x3,
    offset: 0,
    shader_location: 2,
}];

const COLOR_ATTRIBUTES: [VertexAttribute; 1] = [VertexAttribute {
    format: VertexFormat::Float32x3,
    offset: 0,
    shader_location: 3,
}];

impl AttributeKind {
    /// Shader location the attribute is bound to. Every attribute lives in its
    /// own vertex buffer.
    pub fn shader_location(self) -> u32 {
        self.vertex_attributes()[0].shader_location
    }

    /// Vertex format of a single element of the attribute.
    pub fn vertex_format(self) -> VertexFormat {
        self.vertex_attributes()[0].format
    }

    fn vertex_attributes(self) -> &'static [VertexAttribute] {
        match self {
            AttributeKind::Position => &POSITION_ATTRIBUTES,
            AttributeKind::Texcoord => &TEXCOORD_ATTRIBUTES,
            AttributeKind::Normal => &NORMAL_ATTRIBUTES,
            AttributeKind::Color => &COLOR_ATTRIBUTES,
        }
    }

    /// Layout of a vertex buffer holding only this attribute.
    pub fn vertex_buffer_layout(self) -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: (self.components() * size_of::<f32>()) as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: self.vertex_attributes(),
        }
    }
}

impl GeometryData {
    /// Returns the attribute array as raw bytes, ready for
    /// [`Queue::write_buffer`](wgpu::Queue::write_buffer).
    pub fn bytes(&self, kind: AttributeKind) -> Option<&[u8]> {
        self.get(kind).map(bytemuck::cast_slice)
    }
}

impl GeometryGroup {
    /// Returns one vertex buffer layout per present attribute, in shader
    /// location order.
    pub fn vertex_buffer_layouts(&self) -> Vec<(AttributeKind, wgpu::VertexBufferLayout<'static>)> {
        self.data
            .iter()
            .map(|(kind, _)| (kind, kind.vertex_buffer_layout()))
            .collect()
    }
}
