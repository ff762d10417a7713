use crate::flt::cursor::ReadBe;
use crate::flt::{FltError, Revision, Result};

/// Total length of the header record in the reference revisions.
pub const HEADER_LEN: u16 = 324;

/// Coordinate units of the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
	/// Metres.
	Metres,
	/// Kilometres.
	Kilometres,
	/// Feet.
	Feet,
	/// Inches.
	Inches,
	/// Nautical miles.
	NauticalMiles,
}

impl Units {
	fn from_raw(raw: u8) -> Result<Self> {
		match raw {
			0 => Ok(Self::Metres),
			1 => Ok(Self::Kilometres),
			4 => Ok(Self::Feet),
			5 => Ok(Self::Inches),
			8 => Ok(Self::NauticalMiles),
			other => Err(invalid("coordinate units", i64::from(other))),
		}
	}

	/// Short unit symbol.
	pub fn symbol(self) -> &'static str {
		match self {
			Self::Metres => "m",
			Self::Kilometres => "km",
			Self::Feet => "ft",
			Self::Inches => "in",
			Self::NauticalMiles => "nmi",
		}
	}
}

/// Map projection of the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
	/// Flat earth.
	FlatEarth,
	/// Trapezoidal.
	Trapezoidal,
	/// Round earth.
	RoundEarth,
	/// Lambert conformal conic.
	Lambert,
	/// Universal transverse Mercator.
	Utm,
	/// Geodetic.
	Geodetic,
	/// Geocentric.
	Geocentric,
}

impl Projection {
	fn from_raw(raw: i32) -> Result<Self> {
		match raw {
			0 => Ok(Self::FlatEarth),
			1 => Ok(Self::Trapezoidal),
			2 => Ok(Self::RoundEarth),
			3 => Ok(Self::Lambert),
			4 => Ok(Self::Utm),
			5 => Ok(Self::Geodetic),
			6 => Ok(Self::Geocentric),
			other => Err(invalid("projection", i64::from(other))),
		}
	}

	/// Display name.
	pub fn label(self) -> &'static str {
		match self {
			Self::FlatEarth => "flat earth",
			Self::Trapezoidal => "trapezoidal",
			Self::RoundEarth => "round earth",
			Self::Lambert => "Lambert",
			Self::Utm => "UTM",
			Self::Geodetic => "geodetic",
			Self::Geocentric => "geocentric",
		}
	}
}

/// Earth ellipsoid model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ellipsoid {
	/// WGS 1984.
	Wgs1984,
	/// WGS 1972.
	Wgs1972,
	/// Bessel.
	Bessel,
	/// Clarke 1866.
	Clarke,
	/// NAD 1927.
	Nad1927,
	/// User-defined axes, see [`Header::earth_major_axis`].
	UserDefined,
}

impl Ellipsoid {
	fn from_raw(raw: i32) -> Result<Self> {
		match raw {
			0 => Ok(Self::Wgs1984),
			1 => Ok(Self::Wgs1972),
			2 => Ok(Self::Bessel),
			3 => Ok(Self::Clarke),
			4 => Ok(Self::Nad1927),
			-1 => Ok(Self::UserDefined),
			other => Err(invalid("earth ellipsoid model", i64::from(other))),
		}
	}

	/// Display name.
	pub fn label(self) -> &'static str {
		match self {
			Self::Wgs1984 => "WGS 1984",
			Self::Wgs1972 => "WGS 1972",
			Self::Bessel => "Bessel",
			Self::Clarke => "Clarke",
			Self::Nad1927 => "NAD 1927",
			Self::UserDefined => "user defined",
		}
	}
}

/// Tool that produced the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseOrigin {
	/// OpenFlight.
	OpenFlight,
	/// DIG I / DIG II.
	Dig,
	/// Evans and Sutherland CT5A/CT6.
	EvansSutherlandCt,
	/// PSP DIG.
	PspDig,
	/// General Electric CIV/CV/PT2000.
	GeneralElectric,
	/// Evans and Sutherland GDF.
	EvansSutherlandGdf,
	/// Any other stored value.
	Other(i32),
}

impl DatabaseOrigin {
	fn from_raw(raw: i32) -> Self {
		match raw {
			100 => Self::OpenFlight,
			200 => Self::Dig,
			300 => Self::EvansSutherlandCt,
			400 => Self::PspDig,
			600 => Self::GeneralElectric,
			700 => Self::EvansSutherlandGdf,
			other => Self::Other(other),
		}
	}
}

/// Next-free node ID counters kept by the modelling tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimaryNodeIds {
	/// Next group node ID.
	pub group: u16,
	/// Next level of detail node ID.
	pub lod: u16,
	/// Next object node ID.
	pub object: u16,
	/// Next face node ID.
	pub face: u16,
	/// Next degree of freedom node ID.
	pub dof: u16,
	/// Next sound node ID.
	pub sound: u16,
	/// Next road path node ID.
	pub path: u16,
	/// Next clip region node ID.
	pub clip: u16,
	/// Next text node ID.
	pub text: u16,
	/// Next binary separating plane node ID.
	pub bsp: u16,
	/// Next switch node ID.
	pub switch: u16,
	/// Next light source node ID.
	pub light_source: u16,
	/// Next light point node ID.
	pub light_point: u16,
	/// Next road node ID.
	pub road: u16,
	/// Next CAT node ID.
	pub cat: u16,
	/// Next adaptive node ID.
	pub adaptive: u16,
	/// Next curve node ID.
	pub curve: u16,
	/// Next mesh node ID.
	pub mesh: u16,
	/// Next light point system node ID.
	pub light_point_system: u16,
}

/// Database extents and geodetic reference points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DatabaseCoords {
	/// Southwest corner x.
	pub sw_x: f64,
	/// Southwest corner y.
	pub sw_y: f64,
	/// Delta x to place the database.
	pub dx: f64,
	/// Delta y to place the database.
	pub dy: f64,
	/// Delta z to place the database.
	pub dz: f64,
	/// Southwest corner latitude.
	pub sw_lat: f64,
	/// Southwest corner longitude.
	pub sw_lon: f64,
	/// Northeast corner latitude.
	pub ne_lat: f64,
	/// Northeast corner longitude.
	pub ne_lon: f64,
	/// Origin latitude.
	pub origin_lat: f64,
	/// Origin longitude.
	pub origin_lon: f64,
	/// Lambert upper latitude.
	pub lambert_upper_lat: f64,
	/// Lambert lower latitude.
	pub lambert_lower_lat: f64,
	/// Earth radius.
	pub radius: f64,
}

/// Decoded header record.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
	/// Database identifier.
	pub name: String,
	/// Validated format revision.
	pub revision: Revision,
	/// Edit revision counter.
	pub edit_revision: i32,
	/// Date and time of the last revision, as stored.
	pub last_revision: String,
	/// Primary node ID table.
	pub ids: PrimaryNodeIds,
	/// Coordinate units.
	pub units: Units,
	/// Set white texture on new faces.
	pub texture_white: bool,
	/// Header flag word.
	pub flags: u32,
	/// Projection type.
	pub projection: Projection,
	/// Database origin.
	pub origin: DatabaseOrigin,
	/// Extents and reference points.
	pub coords: DatabaseCoords,
	/// Earth ellipsoid model.
	pub ellipsoid: Ellipsoid,
	/// UTM zone.
	pub utm_zone: u16,
	/// Earth major axis for user-defined ellipsoids.
	pub earth_major_axis: f64,
	/// Earth minor axis for user-defined ellipsoids.
	pub earth_minor_axis: f64,
}

impl Header {
	/// Parse the fixed header fields following the opcode and length field.
	///
	/// Consumes exactly `HEADER_LEN - 4` bytes on success.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let name = r.read_string(8)?;
		let revision = Revision::from_raw(r.read_i32()?)?;
		let edit_revision = r.read_i32()?;
		let last_revision = r.read_string(32)?;

		let mut ids = PrimaryNodeIds {
			group: r.read_u16()?,
			lod: r.read_u16()?,
			object: r.read_u16()?,
			face: r.read_u16()?,
			..PrimaryNodeIds::default()
		};

		let multiplier = r.read_u16()?;
		if multiplier != 1 {
			return Err(invalid("unit multiplier", i64::from(multiplier)));
		}
		let units = Units::from_raw(r.read_u8()?)?;
		let texture_white = r.read_bool()?;
		let flags = r.read_u32()?;
		r.skip(24)?;

		let projection = Projection::from_raw(r.read_i32()?)?;
		r.skip(28)?;
		ids.dof = r.read_u16()?;
		let storage = r.read_u16()?;
		if storage != 1 {
			return Err(invalid("vertex storage type", i64::from(storage)));
		}
		let origin = DatabaseOrigin::from_raw(r.read_i32()?);

		let mut coords = DatabaseCoords {
			sw_x: r.read_f64()?,
			sw_y: r.read_f64()?,
			dx: r.read_f64()?,
			dy: r.read_f64()?,
			..DatabaseCoords::default()
		};

		ids.sound = r.read_u16()?;
		ids.path = r.read_u16()?;
		r.skip(8)?;
		ids.clip = r.read_u16()?;
		ids.text = r.read_u16()?;
		ids.bsp = r.read_u16()?;
		ids.switch = r.read_u16()?;
		r.skip(4)?;

		coords.sw_lat = r.read_f64()?;
		coords.sw_lon = r.read_f64()?;
		coords.ne_lat = r.read_f64()?;
		coords.ne_lon = r.read_f64()?;
		coords.origin_lat = r.read_f64()?;
		coords.origin_lon = r.read_f64()?;
		coords.lambert_upper_lat = r.read_f64()?;
		coords.lambert_lower_lat = r.read_f64()?;

		ids.light_source = r.read_u16()?;
		ids.light_point = r.read_u16()?;
		ids.road = r.read_u16()?;
		ids.cat = r.read_u16()?;
		r.skip(8)?;
		let ellipsoid = Ellipsoid::from_raw(r.read_i32()?)?;

		ids.adaptive = r.read_u16()?;
		ids.curve = r.read_u16()?;
		let utm_zone = r.read_u16()?;
		r.skip(6)?;
		coords.dz = r.read_f64()?;
		coords.radius = r.read_f64()?;

		ids.mesh = r.read_u16()?;
		ids.light_point_system = r.read_u16()?;
		r.skip(4)?;
		let earth_major_axis = r.read_f64()?;
		let earth_minor_axis = r.read_f64()?;

		Ok(Self {
			name,
			revision,
			edit_revision,
			last_revision,
			ids,
			units,
			texture_white,
			flags,
			projection,
			origin,
			coords,
			ellipsoid,
			utm_zone,
			earth_major_axis,
			earth_minor_axis,
		})
	}
}

fn invalid(field: &'static str, value: i64) -> FltError {
	FltError::InvalidEnumValue { field, value }
}
