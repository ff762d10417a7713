use crate::flt::RecordSize;
use crate::flt::RecordSize::{Chunked, Fixed, Padding, Variable};

/// Opcodes removed from the format. Always fatal.
pub const OBSOLETE_OPCODES: [i16; 22] = [3, 6, 7, 8, 9, 12, 13, 16, 17, 40, 41, 42, 43, 44, 45, 46, 47, 48, 51, 65, 66, 77];

/// Opcode of the continuation record.
pub const CONTINUATION_OPCODE: i16 = 23;

macro_rules! opcode_table {
	($($raw:literal => $variant:ident, $name:literal, $size:expr;)*) => {
		/// Every record kind the registry knows about.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub enum Opcode {
			$(
				#[doc = $name]
				$variant,
			)*
		}

		impl Opcode {
			/// Every registry opcode in ascending wire order.
			pub const ALL: &'static [Opcode] = &[$(Opcode::$variant,)*];

			/// Map a wire opcode to a registry entry.
			pub fn from_raw(raw: i16) -> Option<Self> {
				match raw {
					$($raw => Some(Self::$variant),)*
					_ => None,
				}
			}

			/// Wire value of this opcode.
			pub fn raw(self) -> i16 {
				match self {
					$(Self::$variant => $raw,)*
				}
			}

			/// Human-readable record name used in diagnostics.
			pub fn name(self) -> &'static str {
				match self {
					$(Self::$variant => $name,)*
				}
			}

			/// Declared size before any revision patch is applied.
			pub fn base_size(self) -> RecordSize {
				match self {
					$(Self::$variant => $size,)*
				}
			}
		}
	};
}

opcode_table! {
	0 => Padding, "padding", Padding;
	1 => Header, "header", Fixed(324);
	2 => Group, "group", Fixed(44);
	4 => Object, "object", Fixed(28);
	5 => Face, "face", Fixed(80);
	10 => Push, "push", Fixed(4);
	11 => Pop, "pop", Fixed(4);
	14 => DegreeOfFreedom, "degree of freedom", Fixed(384);
	19 => PushSubface, "push subface", Fixed(4);
	20 => PopSubface, "pop subface", Fixed(4);
	21 => PushExtension, "push extension", Fixed(24);
	22 => PopExtension, "pop extension", Fixed(24);
	23 => Continuation, "continuation", Variable;
	31 => Comment, "comment", Chunked;
	32 => ColourPalette, "colour palette", Variable;
	33 => LongId, "long ID", Variable;
	49 => Matrix, "matrix", Fixed(68);
	50 => Vector, "vector", Fixed(16);
	52 => Multitexture, "multitexture", Variable;
	53 => UvList, "UV list", Variable;
	55 => BinarySeparatingPlane, "binary separating plane", Fixed(48);
	60 => Replicate, "replicate", Fixed(8);
	61 => InstanceReference, "instance reference", Fixed(8);
	62 => InstanceDefinition, "instance definition", Fixed(8);
	63 => ExternalReference, "external reference", Fixed(216);
	64 => TexturePalette, "texture palette", Fixed(216);
	67 => VertexPalette, "vertex palette", Fixed(8);
	68 => VertexColour, "vertex with colour", Fixed(40);
	69 => VertexColourNormal, "vertex with colour and normal", Fixed(56);
	70 => VertexColourNormalUv, "vertex with colour, normal and UV", Fixed(64);
	71 => VertexColourUv, "vertex with colour and UV", Fixed(48);
	72 => VertexList, "vertex list", Chunked;
	73 => LevelOfDetail, "level of detail", Fixed(80);
	74 => BoundingBox, "bounding box", Fixed(56);
	76 => RotateAboutEdge, "rotate about edge", Fixed(64);
	78 => Translate, "translate", Fixed(56);
	79 => Scale, "scale", Fixed(48);
	80 => RotateAboutPoint, "rotate about point", Fixed(48);
	81 => RotateScaleToPoint, "rotate and/or scale to point", Fixed(96);
	82 => Put, "put", Fixed(152);
	83 => EyepointTrackplanePalette, "eyepoint and trackplane palette", Fixed(4008);
	84 => Mesh, "mesh", Fixed(84);
	85 => LocalVertexPool, "local vertex pool", Chunked;
	86 => MeshPrimitive, "mesh primitive", Chunked;
	87 => RoadSegment, "road segment", Fixed(12);
	88 => RoadZone, "road zone", Fixed(176);
	89 => MorphVertexList, "morph vertex list", Chunked;
	90 => LinkagePalette, "linkage palette", Variable;
	91 => Sound, "sound", Fixed(88);
	92 => RoadPath, "road path", Fixed(632);
	93 => SoundPalette, "sound palette", Variable;
	94 => GeneralMatrix, "general matrix", Fixed(68);
	95 => Text, "text", Fixed(320);
	96 => Switch, "switch", Variable;
	97 => LineStylePalette, "line style palette", Fixed(12);
	98 => ClipRegion, "clip region", Fixed(280);
	100 => Extension, "extension", Chunked;
	101 => LightSource, "light source", Fixed(64);
	102 => LightSourcePalette, "light source palette", Fixed(240);
	103 => Reserved103, "reserved", Variable;
	104 => Reserved104, "reserved", Variable;
	105 => BoundingSphere, "bounding sphere", Fixed(16);
	106 => BoundingCylinder, "bounding cylinder", Fixed(24);
	107 => BoundingConvexHull, "bounding convex hull", Chunked;
	108 => BoundingVolumeCentre, "bounding volume centre", Fixed(32);
	109 => BoundingVolumeOrientation, "bounding volume orientation", Fixed(32);
	110 => Reserved110, "reserved", Variable;
	111 => LightPoint, "light point", Fixed(156);
	112 => TextureMappingPalette, "texture mapping palette", Variable;
	113 => MaterialPalette, "material palette", Fixed(84);
	114 => NameTable, "name table", Chunked;
	115 => Cat, "continuously adaptive terrain (CAT)", Fixed(80);
	116 => CatData, "CAT data", Variable;
	117 => Reserved117, "reserved", Variable;
	118 => Reserved118, "reserved", Variable;
	119 => BoundingHistogram, "bounding histogram", Variable;
	120 => Reserved120, "reserved", Variable;
	121 => Reserved121, "reserved", Variable;
	122 => PushAttribute, "push attribute", Fixed(8);
	123 => PopAttribute, "pop attribute", Fixed(4);
	124 => Reserved124, "reserved", Variable;
	125 => Reserved125, "reserved", Variable;
	126 => Curve, "curve", Variable;
	127 => RoadConstruction, "road construction", Fixed(168);
	128 => LightPointAppearancePalette, "light point appearance palette", Fixed(412);
	129 => LightPointAnimationPalette, "light point animation palette", Variable;
	130 => IndexedLightPoint, "indexed light point", Fixed(28);
	131 => LightPointSystem, "light point system", Fixed(24);
	132 => IndexedString, "indexed string", Chunked;
	133 => ShaderPalette, "shader palette", Variable;
	134 => Reserved134, "reserved", Variable;
	135 => ExtendedMaterialHeader, "extended material header", Fixed(28);
	136 => ExtendedMaterialAmbient, "extended material ambient", Fixed(48);
	137 => ExtendedMaterialDiffuse, "extended material diffuse", Fixed(48);
	138 => ExtendedMaterialSpecular, "extended material specular", Fixed(52);
	139 => ExtendedMaterialEmissive, "extended material emissive", Fixed(48);
	140 => ExtendedMaterialAlpha, "extended material alpha", Fixed(44);
	141 => ExtendedMaterialLightMap, "extended material light map", Fixed(16);
	142 => ExtendedMaterialNormalMap, "extended material normal map", Fixed(12);
	143 => ExtendedMaterialBumpMap, "extended material bump map", Fixed(20);
	144 => Reserved144, "reserved", Variable;
	145 => ExtendedMaterialShadowMap, "extended material shadow map", Fixed(16);
	146 => Reserved146, "reserved", Variable;
	147 => ExtendedMaterialReflectionMap, "extended material reflection map", Fixed(32);
	148 => ExtensionGuidPalette, "extension GUID palette", Fixed(48);
	149 => ExtensionFieldBool, "extension field boolean", Fixed(12);
	150 => ExtensionFieldInt, "extension field integer", Fixed(12);
	151 => ExtensionFieldFloat, "extension field float", Fixed(12);
	152 => ExtensionFieldDouble, "extension field double", Fixed(16);
	153 => ExtensionFieldString, "extension field string", Chunked;
	154 => ExtensionFieldXmlString, "extension field XML string", Chunked;
}

impl Opcode {
	/// Return `true` for opcodes with no payload semantics.
	pub fn is_reserved(self) -> bool {
		matches!(
			self,
			Self::Reserved103
				| Self::Reserved104
				| Self::Reserved110
				| Self::Reserved117
				| Self::Reserved118
				| Self::Reserved120
				| Self::Reserved121
				| Self::Reserved124
				| Self::Reserved125
				| Self::Reserved134
				| Self::Reserved144
				| Self::Reserved146
		)
	}
}

/// Return `true` when `raw` is in the obsolete set.
pub fn is_obsolete(raw: i16) -> bool {
	OBSOLETE_OPCODES.contains(&raw)
}
