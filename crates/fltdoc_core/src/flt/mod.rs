mod attr;
mod builder;
mod chunk;
mod cursor;
mod document;
mod error;
mod external;
mod header;
mod opcode;
mod record;
mod registry;
mod validate;
mod version;

/// Texture attribute collaborator and its default file decoder.
pub use attr::{AttrFileLoader, AttributeLoader, TextureAttributes};
/// Push/pop scene-graph builder and the instance arena.
pub use builder::{Builder, InstanceHandle, Instances};
/// Continuation-record reassembly.
pub use chunk::{Chunk, read_body};
/// Big-endian primitive cursors.
pub use cursor::{ChunkCursor, ReadBe, StreamCursor, trim_nul};
/// Parsed database aggregate and parse configuration.
pub use document::{Document, ParseOptions, VertexIndex, VertexListTrace, Warning};
/// Error and result types.
pub use error::{ErrorKind, FltError, Result};
/// External reference cache and path cleaning.
pub use external::{External, ExternalCache, attribute_path, clean_path, path_candidates};
/// Header record and its enumerations.
pub use header::{DatabaseCoords, DatabaseOrigin, Ellipsoid, HEADER_LEN, Header, PrimaryNodeIds, Projection, Units};
/// Opcode table.
pub use opcode::{CONTINUATION_OPCODE, OBSOLETE_OPCODES, Opcode, is_obsolete};
/// Typed record payloads and scene-graph nodes.
pub use record::{
	BinarySeparatingPlane, BoundingBox, BoundingConvexHull, BoundingCylinder, BoundingSphere, BoundingVolumeCentre, BoundingVolumeOrientation, Cat,
	ClipRegion, ColourName, ColourPalette, Comment, Curve, DegreeOfFreedom, DofLimits, DrawType, Extension, ExtensionField, ExtensionGuidPalette,
	ExternalReference, Eyepoint, EyepointTrackplanePalette, Face, FieldValue, FourPointMapping, Group, GroupLoop, IndexedLightPoint, IndexedString,
	InstanceRef, LayerRef, LevelOfDetail, LightMode, LightPoint, LightPointAnimationPalette, LightPointAppearancePalette, LightPointSystem, LightSource,
	LightSourcePalette, LineStylePalette, LocalVertex, LocalVertexPool, LongId, MappingParameters, MaterialAlpha, MaterialColour, MaterialHeader,
	MaterialMap, MaterialPalette, MaterialReflection, MaterialSpecular, Matrix, Mesh, MeshPrimitive, MorphVertexList, Multitexture, NameEntry, NameTable,
	Node, Object, OpaqueRecord, PointOptics, PrimitiveType, Put, RadialMapping, Record, Replicate, RoadConstruction, RoadPath, RoadSegment, RoadZone,
	RotateAboutEdge, RotateAboutPoint, RotateScaleToPoint, Scale, ScopeKind, Sequence, ShaderPalette, ShaderProgram, Sound, SoundEntry, SoundPalette,
	SphericalMapping, Surface, Switch, Template, Text, TextureLayer, TextureMappingPalette, TexturePalette, ThreePointMapping, Trackplane, Translate,
	UvList, Vector, Vertex, VertexKind, VertexList, VertexPalette, WarpParameters,
};
/// Opcode registry bound to a revision layout.
pub use registry::{Entry, RecordSize, Registry};
/// Header validation.
pub use validate::{Validated, validate};
/// Format revisions and revision-dependent layout switches.
pub use version::{Layout, Revision};
