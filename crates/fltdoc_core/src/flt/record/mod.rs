use crate::flt::cursor::{ChunkCursor, ReadBe};
use crate::flt::{FltError, Layout, Opcode, Result};

mod ancillary;
mod geometry;
mod hierarchy;
mod lights;
mod palette;
mod road;
mod transform;

/// Comment, long ID, indexed string and extension-field records.
pub use ancillary::{Comment, ExtensionField, ExtensionGuidPalette, FieldValue, IndexedString, LongId, OpaqueRecord};
/// Vertex, vertex list, mesh primitive and texture-coordinate records.
pub use geometry::{
	LocalVertex, LocalVertexPool, MeshPrimitive, MorphVertexList, Multitexture, PrimitiveType, TextureLayer, UvList, Vertex, VertexKind, VertexList,
	VertexPalette,
};
/// Scope-opening hierarchy records.
pub use hierarchy::{
	BinarySeparatingPlane, Cat, ClipRegion, DegreeOfFreedom, DofLimits, DrawType, Extension, ExternalReference, Face, Group, GroupLoop, InstanceRef,
	LevelOfDetail, LightMode, Mesh, Object, Sound, Surface, Switch, Template, Text,
};
/// Light source, light point and light point palette records.
pub use lights::{
	IndexedLightPoint, LightPoint, LightPointAnimationPalette, LightPointAppearancePalette, LightPointSystem, LightSource, LightSourcePalette,
	PointOptics, Sequence,
};
/// Colour, texture, material and other palette records.
pub use palette::{
	ColourName, ColourPalette, Eyepoint, EyepointTrackplanePalette, LayerRef, LineStylePalette, MappingParameters, MaterialAlpha, MaterialColour,
	MaterialHeader, MaterialMap, MaterialPalette, MaterialReflection, MaterialSpecular, NameEntry, NameTable, RadialMapping, ShaderPalette,
	ShaderProgram, SoundEntry, SoundPalette, SphericalMapping, TextureMappingPalette, TexturePalette, ThreePointMapping, FourPointMapping,
	Trackplane, WarpParameters,
};
/// Road, path, zone and curve records.
pub use road::{Curve, RoadConstruction, RoadPath, RoadSegment, RoadZone};
/// Transform and bounding-volume records.
pub use transform::{
	BoundingBox, BoundingConvexHull, BoundingCylinder, BoundingSphere, BoundingVolumeCentre, BoundingVolumeOrientation, Matrix, Put, Replicate,
	RotateAboutEdge, RotateAboutPoint, RotateScaleToPoint, Scale, Translate, Vector,
};

/// One decoded record kept in the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
	/// Group record.
	Group(Group),
	/// Object record.
	Object(Object),
	/// Face record.
	Face(Face),
	/// Mesh record.
	Mesh(Mesh),
	/// Level of detail record.
	LevelOfDetail(LevelOfDetail),
	/// Degree of freedom record.
	DegreeOfFreedom(Box<DegreeOfFreedom>),
	/// Switch record.
	Switch(Switch),
	/// Binary separating plane record.
	BinarySeparatingPlane(BinarySeparatingPlane),
	/// External reference record.
	ExternalReference(ExternalReference),
	/// Reference aliasing a defined instance.
	InstanceReference(InstanceRef),
	/// Sound record.
	Sound(Sound),
	/// Text record.
	Text(Box<Text>),
	/// Clip region record.
	ClipRegion(Box<ClipRegion>),
	/// CAT record.
	Cat(Cat),
	/// Extension record.
	Extension(Extension),
	/// Light source record.
	LightSource(LightSource),
	/// Light point record.
	LightPoint(Box<LightPoint>),
	/// Indexed light point record.
	IndexedLightPoint(IndexedLightPoint),
	/// Light point system record.
	LightPointSystem(LightPointSystem),
	/// Road segment record.
	RoadSegment(RoadSegment),
	/// Road path record.
	RoadPath(RoadPath),
	/// Road construction record.
	RoadConstruction(Box<RoadConstruction>),
	/// Road zone record.
	RoadZone(RoadZone),
	/// Curve record.
	Curve(Curve),
	/// Comment record.
	Comment(Comment),
	/// Long ID record.
	LongId(LongId),
	/// Matrix record.
	Matrix(Matrix),
	/// General matrix record.
	GeneralMatrix(Matrix),
	/// Vector record.
	Vector(Vector),
	/// Multitexture record.
	Multitexture(Multitexture),
	/// UV list record.
	UvList(UvList),
	/// Replicate record.
	Replicate(Replicate),
	/// Bounding box record.
	BoundingBox(BoundingBox),
	/// Bounding sphere record.
	BoundingSphere(BoundingSphere),
	/// Bounding cylinder record.
	BoundingCylinder(BoundingCylinder),
	/// Bounding convex hull record.
	BoundingConvexHull(BoundingConvexHull),
	/// Bounding volume centre record.
	BoundingVolumeCentre(BoundingVolumeCentre),
	/// Bounding volume orientation record.
	BoundingVolumeOrientation(BoundingVolumeOrientation),
	/// Bounding histogram record, kept opaque.
	BoundingHistogram(OpaqueRecord),
	/// Translate record.
	Translate(Translate),
	/// Scale record.
	Scale(Scale),
	/// Rotate about edge record.
	RotateAboutEdge(RotateAboutEdge),
	/// Rotate about point record.
	RotateAboutPoint(RotateAboutPoint),
	/// Rotate scale to point record.
	RotateScaleToPoint(RotateScaleToPoint),
	/// Put record.
	Put(Box<Put>),
	/// Vertex palette record.
	VertexPalette(VertexPalette),
	/// Vertex list record.
	VertexList(VertexList),
	/// Morph vertex list record.
	MorphVertexList(MorphVertexList),
	/// Local vertex pool record.
	LocalVertexPool(LocalVertexPool),
	/// Mesh primitive record.
	MeshPrimitive(MeshPrimitive),
	/// Colour palette record.
	ColourPalette(Box<ColourPalette>),
	/// Texture palette record.
	TexturePalette(TexturePalette),
	/// Material palette record.
	MaterialPalette(MaterialPalette),
	/// Light source palette record.
	LightSourcePalette(LightSourcePalette),
	/// Eyepoint trackplane palette record.
	EyepointTrackplanePalette(Box<EyepointTrackplanePalette>),
	/// Line style palette record.
	LineStylePalette(LineStylePalette),
	/// Texture mapping palette record.
	TextureMappingPalette(Box<TextureMappingPalette>),
	/// Shader palette record.
	ShaderPalette(ShaderPalette),
	/// Sound palette record.
	SoundPalette(SoundPalette),
	/// Name table record.
	NameTable(NameTable),
	/// Linkage palette record, kept opaque.
	LinkagePalette(OpaqueRecord),
	/// Light point appearance palette record.
	LightPointAppearancePalette(Box<LightPointAppearancePalette>),
	/// Light point animation palette record.
	LightPointAnimationPalette(Box<LightPointAnimationPalette>),
	/// Extended material header record.
	ExtendedMaterialHeader(MaterialHeader),
	/// Extended material ambient record.
	ExtendedMaterialAmbient(MaterialColour),
	/// Extended material diffuse record.
	ExtendedMaterialDiffuse(MaterialColour),
	/// Extended material specular record.
	ExtendedMaterialSpecular(MaterialSpecular),
	/// Extended material emissive record.
	ExtendedMaterialEmissive(MaterialColour),
	/// Extended material alpha record.
	ExtendedMaterialAlpha(MaterialAlpha),
	/// Extended material light map record.
	ExtendedMaterialLightMap(MaterialMap),
	/// Extended material normal map record.
	ExtendedMaterialNormalMap(MaterialMap),
	/// Extended material bump map record.
	ExtendedMaterialBumpMap(MaterialMap),
	/// Extended material shadow map record.
	ExtendedMaterialShadowMap(MaterialMap),
	/// Extended material reflection map record.
	ExtendedMaterialReflectionMap(MaterialReflection),
	/// Extension GUID palette record.
	ExtensionGuidPalette(ExtensionGuidPalette),
	/// Extension field record of any value type.
	ExtensionField(ExtensionField),
	/// Indexed string record.
	IndexedString(IndexedString),
	/// CAT data record, kept opaque.
	CatData(OpaqueRecord),
}

impl Record {
	/// Opcode the record was decoded from.
	pub fn opcode(&self) -> Opcode {
		match self {
			Self::Group(_) => Opcode::Group,
			Self::Object(_) => Opcode::Object,
			Self::Face(_) => Opcode::Face,
			Self::Mesh(_) => Opcode::Mesh,
			Self::LevelOfDetail(_) => Opcode::LevelOfDetail,
			Self::DegreeOfFreedom(_) => Opcode::DegreeOfFreedom,
			Self::Switch(_) => Opcode::Switch,
			Self::BinarySeparatingPlane(_) => Opcode::BinarySeparatingPlane,
			Self::ExternalReference(_) => Opcode::ExternalReference,
			Self::InstanceReference(_) => Opcode::InstanceReference,
			Self::Sound(_) => Opcode::Sound,
			Self::Text(_) => Opcode::Text,
			Self::ClipRegion(_) => Opcode::ClipRegion,
			Self::Cat(_) => Opcode::Cat,
			Self::Extension(_) => Opcode::Extension,
			Self::LightSource(_) => Opcode::LightSource,
			Self::LightPoint(_) => Opcode::LightPoint,
			Self::IndexedLightPoint(_) => Opcode::IndexedLightPoint,
			Self::LightPointSystem(_) => Opcode::LightPointSystem,
			Self::RoadSegment(_) => Opcode::RoadSegment,
			Self::RoadPath(_) => Opcode::RoadPath,
			Self::RoadConstruction(_) => Opcode::RoadConstruction,
			Self::RoadZone(_) => Opcode::RoadZone,
			Self::Curve(_) => Opcode::Curve,
			Self::Comment(_) => Opcode::Comment,
			Self::LongId(_) => Opcode::LongId,
			Self::Matrix(_) => Opcode::Matrix,
			Self::GeneralMatrix(_) => Opcode::GeneralMatrix,
			Self::Vector(_) => Opcode::Vector,
			Self::Multitexture(_) => Opcode::Multitexture,
			Self::UvList(_) => Opcode::UvList,
			Self::Replicate(_) => Opcode::Replicate,
			Self::BoundingBox(_) => Opcode::BoundingBox,
			Self::BoundingSphere(_) => Opcode::BoundingSphere,
			Self::BoundingCylinder(_) => Opcode::BoundingCylinder,
			Self::BoundingConvexHull(_) => Opcode::BoundingConvexHull,
			Self::BoundingVolumeCentre(_) => Opcode::BoundingVolumeCentre,
			Self::BoundingVolumeOrientation(_) => Opcode::BoundingVolumeOrientation,
			Self::BoundingHistogram(_) => Opcode::BoundingHistogram,
			Self::Translate(_) => Opcode::Translate,
			Self::Scale(_) => Opcode::Scale,
			Self::RotateAboutEdge(_) => Opcode::RotateAboutEdge,
			Self::RotateAboutPoint(_) => Opcode::RotateAboutPoint,
			Self::RotateScaleToPoint(_) => Opcode::RotateScaleToPoint,
			Self::Put(_) => Opcode::Put,
			Self::VertexPalette(_) => Opcode::VertexPalette,
			Self::VertexList(_) => Opcode::VertexList,
			Self::MorphVertexList(_) => Opcode::MorphVertexList,
			Self::LocalVertexPool(_) => Opcode::LocalVertexPool,
			Self::MeshPrimitive(_) => Opcode::MeshPrimitive,
			Self::ColourPalette(_) => Opcode::ColourPalette,
			Self::TexturePalette(_) => Opcode::TexturePalette,
			Self::MaterialPalette(_) => Opcode::MaterialPalette,
			Self::LightSourcePalette(_) => Opcode::LightSourcePalette,
			Self::EyepointTrackplanePalette(_) => Opcode::EyepointTrackplanePalette,
			Self::LineStylePalette(_) => Opcode::LineStylePalette,
			Self::TextureMappingPalette(_) => Opcode::TextureMappingPalette,
			Self::ShaderPalette(_) => Opcode::ShaderPalette,
			Self::SoundPalette(_) => Opcode::SoundPalette,
			Self::NameTable(_) => Opcode::NameTable,
			Self::LinkagePalette(_) => Opcode::LinkagePalette,
			Self::LightPointAppearancePalette(_) => Opcode::LightPointAppearancePalette,
			Self::LightPointAnimationPalette(_) => Opcode::LightPointAnimationPalette,
			Self::ExtendedMaterialHeader(_) => Opcode::ExtendedMaterialHeader,
			Self::ExtendedMaterialAmbient(_) => Opcode::ExtendedMaterialAmbient,
			Self::ExtendedMaterialDiffuse(_) => Opcode::ExtendedMaterialDiffuse,
			Self::ExtendedMaterialSpecular(_) => Opcode::ExtendedMaterialSpecular,
			Self::ExtendedMaterialEmissive(_) => Opcode::ExtendedMaterialEmissive,
			Self::ExtendedMaterialAlpha(_) => Opcode::ExtendedMaterialAlpha,
			Self::ExtendedMaterialLightMap(_) => Opcode::ExtendedMaterialLightMap,
			Self::ExtendedMaterialNormalMap(_) => Opcode::ExtendedMaterialNormalMap,
			Self::ExtendedMaterialBumpMap(_) => Opcode::ExtendedMaterialBumpMap,
			Self::ExtendedMaterialShadowMap(_) => Opcode::ExtendedMaterialShadowMap,
			Self::ExtendedMaterialReflectionMap(_) => Opcode::ExtendedMaterialReflectionMap,
			Self::ExtensionGuidPalette(_) => Opcode::ExtensionGuidPalette,
			Self::ExtensionField(field) => field.value.opcode(),
			Self::IndexedString(_) => Opcode::IndexedString,
			Self::CatData(_) => Opcode::CatData,
		}
	}

	/// Friendly record name.
	pub fn name(&self) -> &'static str {
		self.opcode().name()
	}

	/// Return `true` for primary records that own the children of a following push.
	pub fn opens_scope(&self) -> bool {
		matches!(
			self,
			Self::Group(_)
				| Self::Object(_)
				| Self::Face(_)
				| Self::Mesh(_)
				| Self::LevelOfDetail(_)
				| Self::DegreeOfFreedom(_)
				| Self::Switch(_)
				| Self::BinarySeparatingPlane(_)
				| Self::ExternalReference(_)
				| Self::Sound(_)
				| Self::Text(_)
				| Self::ClipRegion(_)
				| Self::Cat(_)
				| Self::Extension(_)
				| Self::LightSource(_)
				| Self::LightPoint(_)
				| Self::IndexedLightPoint(_)
				| Self::LightPointSystem(_)
				| Self::RoadSegment(_)
				| Self::RoadPath(_)
				| Self::RoadConstruction(_)
				| Self::Curve(_)
		)
	}

	/// ASCII identifier of primary records.
	pub fn id(&self) -> Option<&str> {
		match self {
			Self::Group(group) => Some(&group.id),
			Self::Object(object) => Some(&object.id),
			Self::Face(face) => Some(&face.id),
			Self::Mesh(mesh) => Some(&mesh.id),
			Self::LevelOfDetail(lod) => Some(&lod.id),
			Self::DegreeOfFreedom(dof) => Some(&dof.id),
			Self::Switch(switch) => Some(&switch.id),
			Self::BinarySeparatingPlane(bsp) => Some(&bsp.id),
			Self::Sound(sound) => Some(&sound.id),
			Self::Text(text) => Some(&text.id),
			Self::ClipRegion(clip) => Some(&clip.id),
			Self::Cat(cat) => Some(&cat.id),
			Self::Extension(extension) => Some(&extension.id),
			Self::LightSource(light) => Some(&light.id),
			Self::LightPoint(light) => Some(&light.id),
			Self::IndexedLightPoint(light) => Some(&light.id),
			Self::LightPointSystem(system) => Some(&system.id),
			Self::RoadSegment(road) => Some(&road.id),
			Self::RoadPath(road) => Some(&road.id),
			Self::RoadConstruction(road) => Some(&road.id),
			Self::Curve(curve) => Some(&curve.id),
			Self::LongId(long) => Some(&long.id),
			_ => None,
		}
	}
}

/// Scene-graph node: a record plus the children of its push/pop scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
	/// Decoded record.
	pub record: Record,
	/// Records between the matching push and pop.
	pub children: Vec<Node>,
}

impl Node {
	/// Wrap a record with no children.
	pub fn new(record: Record) -> Self {
		Self {
			record,
			children: Vec::new(),
		}
	}

	/// Number of nodes in this subtree, instance contents excluded.
	pub fn count(&self) -> usize {
		1 + self.children.iter().map(Node::count).sum::<usize>()
	}
}

/// Push/pop pairing family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
	/// Push (10) / pop (11).
	Plain,
	/// Push subface (19) / pop subface (20).
	Subface,
	/// Push extension (21) / pop extension (22).
	Extension,
	/// Push attribute (122) / pop attribute (123).
	Attribute,
}

impl ScopeKind {
	/// Short label used in diagnostics.
	pub fn label(self) -> &'static str {
		match self {
			Self::Plain => "push",
			Self::Subface => "subface",
			Self::Extension => "extension",
			Self::Attribute => "attribute",
		}
	}
}

/// What the dispatch loop should do with one decoded record.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Decoded {
	Node(Record),
	Vertex(Vertex),
	Push(ScopeKind),
	Pop(ScopeKind),
	BeginInstance(u16),
	ReferenceInstance(u16),
	Skip,
}

/// Decode a fixed-size record body; the opcode and length field are already consumed.
pub(crate) fn parse_fixed<R: ReadBe>(opcode: Opcode, r: &mut R, layout: Layout) -> Result<Decoded> {
	let node = |record: Record| -> Result<Decoded> { Ok(Decoded::Node(record)) };
	match opcode {
		Opcode::Group => node(Record::Group(Group::parse(r, layout)?)),
		Opcode::Object => node(Record::Object(Object::parse(r)?)),
		Opcode::Face => node(Record::Face(Face::parse(r)?)),
		Opcode::Mesh => node(Record::Mesh(Mesh::parse(r)?)),
		Opcode::LevelOfDetail => node(Record::LevelOfDetail(LevelOfDetail::parse(r)?)),
		Opcode::DegreeOfFreedom => node(Record::DegreeOfFreedom(Box::new(DegreeOfFreedom::parse(r)?))),
		Opcode::BinarySeparatingPlane => node(Record::BinarySeparatingPlane(BinarySeparatingPlane::parse(r)?)),
		Opcode::ExternalReference => node(Record::ExternalReference(ExternalReference::parse(r)?)),
		Opcode::Sound => node(Record::Sound(Sound::parse(r)?)),
		Opcode::Text => node(Record::Text(Box::new(Text::parse(r)?))),
		Opcode::ClipRegion => node(Record::ClipRegion(Box::new(ClipRegion::parse(r)?))),
		Opcode::Cat => node(Record::Cat(Cat::parse(r)?)),
		Opcode::LightSource => node(Record::LightSource(LightSource::parse(r)?)),
		Opcode::LightPoint => node(Record::LightPoint(Box::new(LightPoint::parse(r)?))),
		Opcode::IndexedLightPoint => node(Record::IndexedLightPoint(IndexedLightPoint::parse(r)?)),
		Opcode::LightPointSystem => node(Record::LightPointSystem(LightPointSystem::parse(r)?)),
		Opcode::RoadSegment => node(Record::RoadSegment(RoadSegment::parse(r)?)),
		Opcode::RoadPath => node(Record::RoadPath(RoadPath::parse(r)?)),
		Opcode::RoadConstruction => node(Record::RoadConstruction(Box::new(RoadConstruction::parse(r)?))),
		Opcode::RoadZone => node(Record::RoadZone(RoadZone::parse(r)?)),
		Opcode::Matrix => node(Record::Matrix(Matrix::parse(r)?)),
		Opcode::GeneralMatrix => node(Record::GeneralMatrix(Matrix::parse(r)?)),
		Opcode::Vector => node(Record::Vector(Vector::parse(r)?)),
		Opcode::Replicate => node(Record::Replicate(Replicate::parse(r)?)),
		Opcode::BoundingBox => node(Record::BoundingBox(BoundingBox::parse(r)?)),
		Opcode::BoundingSphere => node(Record::BoundingSphere(BoundingSphere::parse(r)?)),
		Opcode::BoundingCylinder => node(Record::BoundingCylinder(BoundingCylinder::parse(r)?)),
		Opcode::BoundingVolumeCentre => node(Record::BoundingVolumeCentre(BoundingVolumeCentre::parse(r)?)),
		Opcode::BoundingVolumeOrientation => node(Record::BoundingVolumeOrientation(BoundingVolumeOrientation::parse(r)?)),
		Opcode::Translate => node(Record::Translate(Translate::parse(r)?)),
		Opcode::Scale => node(Record::Scale(Scale::parse(r)?)),
		Opcode::RotateAboutEdge => node(Record::RotateAboutEdge(RotateAboutEdge::parse(r)?)),
		Opcode::RotateAboutPoint => node(Record::RotateAboutPoint(RotateAboutPoint::parse(r)?)),
		Opcode::RotateScaleToPoint => node(Record::RotateScaleToPoint(RotateScaleToPoint::parse(r)?)),
		Opcode::Put => node(Record::Put(Box::new(Put::parse(r)?))),
		Opcode::VertexPalette => node(Record::VertexPalette(VertexPalette::parse(r)?)),
		Opcode::TexturePalette => node(Record::TexturePalette(TexturePalette::parse(r)?)),
		Opcode::MaterialPalette => node(Record::MaterialPalette(MaterialPalette::parse(r)?)),
		Opcode::LightSourcePalette => node(Record::LightSourcePalette(LightSourcePalette::parse(r)?)),
		Opcode::EyepointTrackplanePalette => node(Record::EyepointTrackplanePalette(Box::new(EyepointTrackplanePalette::parse(r)?))),
		Opcode::LineStylePalette => node(Record::LineStylePalette(LineStylePalette::parse(r)?)),
		Opcode::LightPointAppearancePalette => node(Record::LightPointAppearancePalette(Box::new(LightPointAppearancePalette::parse(r)?))),
		Opcode::ExtendedMaterialHeader => node(Record::ExtendedMaterialHeader(MaterialHeader::parse(r)?)),
		Opcode::ExtendedMaterialAmbient => node(Record::ExtendedMaterialAmbient(MaterialColour::parse(r)?)),
		Opcode::ExtendedMaterialDiffuse => node(Record::ExtendedMaterialDiffuse(MaterialColour::parse(r)?)),
		Opcode::ExtendedMaterialSpecular => node(Record::ExtendedMaterialSpecular(MaterialSpecular::parse(r)?)),
		Opcode::ExtendedMaterialEmissive => node(Record::ExtendedMaterialEmissive(MaterialColour::parse(r)?)),
		Opcode::ExtendedMaterialAlpha => node(Record::ExtendedMaterialAlpha(MaterialAlpha::parse(r)?)),
		Opcode::ExtendedMaterialLightMap => node(Record::ExtendedMaterialLightMap(MaterialMap::parse_intensity(r)?)),
		Opcode::ExtendedMaterialNormalMap => node(Record::ExtendedMaterialNormalMap(MaterialMap::parse_plain(r)?)),
		Opcode::ExtendedMaterialBumpMap => node(Record::ExtendedMaterialBumpMap(MaterialMap::parse_bump(r)?)),
		Opcode::ExtendedMaterialShadowMap => node(Record::ExtendedMaterialShadowMap(MaterialMap::parse_intensity(r)?)),
		Opcode::ExtendedMaterialReflectionMap => node(Record::ExtendedMaterialReflectionMap(MaterialReflection::parse(r)?)),
		Opcode::ExtensionGuidPalette => node(Record::ExtensionGuidPalette(ExtensionGuidPalette::parse(r)?)),
		Opcode::ExtensionFieldBool => node(Record::ExtensionField(ExtensionField::parse_bool(r)?)),
		Opcode::ExtensionFieldInt => node(Record::ExtensionField(ExtensionField::parse_int(r)?)),
		Opcode::ExtensionFieldFloat => node(Record::ExtensionField(ExtensionField::parse_float(r)?)),
		Opcode::ExtensionFieldDouble => node(Record::ExtensionField(ExtensionField::parse_double(r)?)),
		Opcode::VertexColour | Opcode::VertexColourNormal | Opcode::VertexColourNormalUv | Opcode::VertexColourUv => {
			Ok(Decoded::Vertex(Vertex::parse(opcode, r, layout)?))
		}
		Opcode::InstanceDefinition => Ok(Decoded::BeginInstance(InstanceRef::parse_id(r)?)),
		Opcode::InstanceReference => Ok(Decoded::ReferenceInstance(InstanceRef::parse_id(r)?)),
		Opcode::Push | Opcode::Pop | Opcode::PushSubface | Opcode::PopSubface => Ok(scope_marker(opcode)),
		Opcode::PushExtension | Opcode::PopExtension => {
			r.skip(18)?;
			let _vertex_reference = r.read_u16()?;
			Ok(scope_marker(opcode))
		}
		Opcode::PushAttribute => {
			r.skip(4)?;
			Ok(scope_marker(opcode))
		}
		Opcode::PopAttribute => Ok(scope_marker(opcode)),
		_ => Ok(Decoded::Skip),
	}
}

/// Decode a length-prefixed record from its reassembled body.
pub(crate) fn parse_variable(opcode: Opcode, r: &mut ChunkCursor<'_>) -> Result<Decoded> {
	let record = match opcode {
		Opcode::Comment => Record::Comment(Comment::parse(r)),
		Opcode::LongId => Record::LongId(LongId::parse(r)),
		Opcode::ColourPalette => Record::ColourPalette(Box::new(ColourPalette::parse(r)?)),
		Opcode::Multitexture => Record::Multitexture(Multitexture::parse(r)?),
		Opcode::UvList => Record::UvList(UvList::parse(r)?),
		Opcode::VertexList => Record::VertexList(VertexList::parse(r)?),
		Opcode::MorphVertexList => Record::MorphVertexList(MorphVertexList::parse(r)?),
		Opcode::LocalVertexPool => Record::LocalVertexPool(LocalVertexPool::parse(r)?),
		Opcode::MeshPrimitive => Record::MeshPrimitive(MeshPrimitive::parse(r)?),
		Opcode::LinkagePalette => Record::LinkagePalette(OpaqueRecord::parse(r)),
		Opcode::SoundPalette => Record::SoundPalette(SoundPalette::parse(r)?),
		Opcode::Switch => Record::Switch(Switch::parse(r)?),
		Opcode::Extension => Record::Extension(Extension::parse(r)?),
		Opcode::BoundingConvexHull => Record::BoundingConvexHull(BoundingConvexHull::parse(r)?),
		Opcode::TextureMappingPalette => Record::TextureMappingPalette(Box::new(TextureMappingPalette::parse(r)?)),
		Opcode::NameTable => Record::NameTable(NameTable::parse(r)?),
		Opcode::CatData => Record::CatData(OpaqueRecord::parse(r)),
		Opcode::BoundingHistogram => Record::BoundingHistogram(OpaqueRecord::parse(r)),
		Opcode::Curve => Record::Curve(Curve::parse(r)?),
		Opcode::LightPointAnimationPalette => Record::LightPointAnimationPalette(Box::new(LightPointAnimationPalette::parse(r)?)),
		Opcode::IndexedString => Record::IndexedString(IndexedString::parse(r)?),
		Opcode::ShaderPalette => Record::ShaderPalette(ShaderPalette::parse(r)?),
		Opcode::ExtensionFieldString => Record::ExtensionField(ExtensionField::parse_string(r, false)?),
		Opcode::ExtensionFieldXmlString => Record::ExtensionField(ExtensionField::parse_string(r, true)?),
		_ => return Ok(Decoded::Skip),
	};
	Ok(Decoded::Node(record))
}

fn scope_marker(opcode: Opcode) -> Decoded {
	match opcode {
		Opcode::Push => Decoded::Push(ScopeKind::Plain),
		Opcode::Pop => Decoded::Pop(ScopeKind::Plain),
		Opcode::PushSubface => Decoded::Push(ScopeKind::Subface),
		Opcode::PopSubface => Decoded::Pop(ScopeKind::Subface),
		Opcode::PushExtension => Decoded::Push(ScopeKind::Extension),
		Opcode::PopExtension => Decoded::Pop(ScopeKind::Extension),
		Opcode::PushAttribute => Decoded::Push(ScopeKind::Attribute),
		_ => Decoded::Pop(ScopeKind::Attribute),
	}
}

/// Fail unless `value` is one of `allowed`.
pub(crate) fn one_of(field: &'static str, value: i64, allowed: &[i64]) -> Result<()> {
	if allowed.contains(&value) {
		return Ok(());
	}
	Err(FltError::InvalidEnumValue { field, value })
}

/// `-1` index sentinel.
pub(crate) fn index_i16(raw: i16) -> Option<i16> {
	(raw != -1).then_some(raw)
}

/// `-1` index sentinel on a 32-bit field.
pub(crate) fn index_i32(raw: i32) -> Option<i32> {
	(raw != -1).then_some(raw)
}

/// All-ones index sentinel on an unsigned 32-bit field.
pub(crate) fn index_u32(raw: u32) -> Option<u32> {
	(raw != u32::MAX).then_some(raw)
}

/// Fail when a chunked payload declares more bytes than reassembly produced.
pub(crate) fn require(r: &ChunkCursor<'_>, name: &'static str, need: u64) -> Result<()> {
	let have = r.remaining() as u64;
	if need > have {
		return Err(FltError::MissingContinuation { name, need, have });
	}
	Ok(())
}

#[cfg(test)]
mod tests;
