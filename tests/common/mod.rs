#![allow(dead_code)]

use std::any::Any;
use std::collections::HashMap;

use recast::cast::{
	CastError, Decoded, Descriptor, EnumMember, EnumShape, FieldTable, ModelVtable, Record, RecordShape, Result, ScalarKind, Value,
};

pub static MODE: EnumShape = EnumShape {
	name: "Mode",
	members: &["Active", "Passive", "Drain"],
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point {
	pub x: i64,
	pub y: i64,
}

pub static POINT: RecordShape = RecordShape {
	name: "Point",
	fields: &["x", "y"],
	new_default: point_default,
	type_hints: point_hints,
	model: None,
};

fn point_default() -> Box<dyn Record> {
	Box::new(Point::default())
}

fn point_hints() -> FieldTable {
	HashMap::from([
		("x", Descriptor::Scalar(ScalarKind::Int)),
		("y", Descriptor::Scalar(ScalarKind::Int)),
	])
}

impl Record for Point {
	fn shape(&self) -> &'static RecordShape {
		&POINT
	}

	fn set_field(&mut self, name: &str, value: Decoded) -> Result<()> {
		let n = require_i64(name, &value)?;
		match name {
			"x" => self.x = n,
			"y" => self.y = n,
			_ => {}
		}
		Ok(())
	}

	fn fields(&self) -> Vec<(&'static str, Decoded)> {
		vec![("x", Decoded::from(self.x)), ("y", Decoded::from(self.y))]
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn clone_box(&self) -> Box<dyn Record> {
		Box::new(self.clone())
	}
}

/// Exercises every descriptor family the engine supports.
#[derive(Debug, Clone, PartialEq)]
pub struct Server {
	pub name: String,
	pub port: u64,
	pub timeout: Option<i64>,
	pub mode: EnumMember,
	pub tags: Vec<String>,
	pub points: Vec<Point>,
	pub home: Option<Point>,
	pub extra: Value,
}

impl Default for Server {
	fn default() -> Self {
		Self {
			name: String::new(),
			port: 0,
			timeout: None,
			mode: MODE.member_at(0).expect("Mode has members"),
			tags: Vec::new(),
			points: Vec::new(),
			home: None,
			extra: Value::Map(Vec::new()),
		}
	}
}

pub static SERVER: RecordShape = RecordShape {
	name: "Server",
	fields: &["name", "port", "timeout", "mode", "tags", "points", "home", "extra"],
	new_default: server_default,
	type_hints: server_hints,
	model: None,
};

fn server_default() -> Box<dyn Record> {
	Box::new(Server::default())
}

fn server_hints() -> FieldTable {
	HashMap::from([
		("name", Descriptor::Scalar(ScalarKind::Str)),
		("port", Descriptor::Scalar(ScalarKind::UInt)),
		("timeout", Descriptor::optional(Descriptor::Scalar(ScalarKind::Int))),
		("mode", Descriptor::Enum(&MODE)),
		("tags", Descriptor::sequence(Descriptor::Scalar(ScalarKind::Str))),
		("points", Descriptor::sequence(Descriptor::Record(&POINT))),
		("home", Descriptor::optional(Descriptor::Record(&POINT))),
		("extra", Descriptor::Scalar(ScalarKind::AnyMap)),
	])
}

impl Record for Server {
	fn shape(&self) -> &'static RecordShape {
		&SERVER
	}

	fn set_field(&mut self, name: &str, value: Decoded) -> Result<()> {
		match name {
			"name" => self.name = require_str(name, &value)?,
			"port" => self.port = require_u64(name, &value)?,
			"timeout" => {
				self.timeout = match value {
					Decoded::Null => None,
					other => Some(require_i64(name, &other)?),
				}
			}
			"mode" => self.mode = require_enum(name, &value)?,
			"tags" => {
				let Decoded::Seq(items) = value else {
					return Err(field_mismatch(name, "sequence", &value));
				};
				let mut tags = Vec::with_capacity(items.len());
				for item in &items {
					tags.push(require_str(name, item)?);
				}
				self.tags = tags;
			}
			"points" => {
				let Decoded::Seq(items) = value else {
					return Err(field_mismatch(name, "sequence", &value));
				};
				let mut points = Vec::with_capacity(items.len());
				for item in &items {
					points.push(require_point(name, item)?);
				}
				self.points = points;
			}
			"home" => {
				self.home = match value {
					Decoded::Null => None,
					other => Some(require_point(name, &other)?),
				}
			}
			"extra" => {
				self.extra = match value {
					Decoded::Value(v) => v,
					other => return Err(field_mismatch(name, "mapping", &other)),
				}
			}
			_ => {}
		}
		Ok(())
	}

	fn fields(&self) -> Vec<(&'static str, Decoded)> {
		vec![
			("name", Decoded::from(self.name.clone())),
			("port", Decoded::from(self.port)),
			("timeout", self.timeout.map_or(Decoded::Null, Decoded::from)),
			("mode", Decoded::Enum(self.mode)),
			("tags", Decoded::Seq(self.tags.iter().map(|t| Decoded::from(t.as_str())).collect())),
			(
				"points",
				Decoded::Seq(self.points.iter().map(|p| Decoded::Record(Box::new(p.clone()) as Box<dyn Record>)).collect()),
			),
			(
				"home",
				self.home
					.as_ref()
					.map_or(Decoded::Null, |p| Decoded::Record(Box::new(p.clone()) as Box<dyn Record>)),
			),
			("extra", Decoded::Value(self.extra.clone())),
		]
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn clone_box(&self) -> Box<dyn Record> {
		Box::new(self.clone())
	}
}

/// Schema-validated model: carries its own constructor and exporter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Endpoint {
	pub host: String,
	pub port: u64,
}

pub static ENDPOINT: RecordShape = RecordShape {
	name: "Endpoint",
	fields: &["host", "port"],
	new_default: endpoint_default,
	type_hints: endpoint_hints,
	model: Some(ModelVtable {
		from_mapping: endpoint_from_mapping,
		to_mapping: endpoint_to_mapping,
	}),
};

fn endpoint_default() -> Box<dyn Record> {
	Box::new(Endpoint::default())
}

fn endpoint_hints() -> FieldTable {
	HashMap::from([
		("host", Descriptor::Scalar(ScalarKind::Str)),
		("port", Descriptor::Scalar(ScalarKind::UInt)),
	])
}

fn endpoint_from_mapping(data: &Value) -> Result<Box<dyn Record>> {
	let host = match data.get("host") {
		Some(Value::Str(s)) if !s.is_empty() => s.clone(),
		other => {
			return Err(CastError::Validation {
				key: "host".to_owned(),
				expected: "non-empty string".to_owned(),
				got: format!("{other:?}"),
			});
		}
	};
	let port = match data.get("port") {
		Some(Value::U64(n)) => *n,
		Some(Value::I64(n)) if *n > 0 => *n as u64,
		other => {
			return Err(CastError::Validation {
				key: "port".to_owned(),
				expected: "positive integer".to_owned(),
				got: format!("{other:?}"),
			});
		}
	};
	Ok(Box::new(Endpoint { host, port }))
}

fn endpoint_to_mapping(record: &dyn Record) -> Result<Value> {
	let endpoint = record.as_any().downcast_ref::<Endpoint>().ok_or_else(|| CastError::Conversion {
		key: "Endpoint".to_owned(),
		target: "Endpoint".to_owned(),
		value: "foreign record".to_owned(),
	})?;
	Ok(Value::Map(vec![
		("host".to_owned(), Value::Str(endpoint.host.clone())),
		("port".to_owned(), Value::U64(endpoint.port)),
	]))
}

impl Record for Endpoint {
	fn shape(&self) -> &'static RecordShape {
		&ENDPOINT
	}

	fn set_field(&mut self, name: &str, value: Decoded) -> Result<()> {
		match name {
			"host" => self.host = require_str(name, &value)?,
			"port" => self.port = require_u64(name, &value)?,
			_ => {}
		}
		Ok(())
	}

	fn fields(&self) -> Vec<(&'static str, Decoded)> {
		vec![("host", Decoded::from(self.host.clone())), ("port", Decoded::from(self.port))]
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn clone_box(&self) -> Box<dyn Record> {
		Box::new(self.clone())
	}
}

pub fn map(entries: Vec<(&str, Value)>) -> Value {
	Value::Map(entries.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
}

fn require_i64(name: &str, value: &Decoded) -> Result<i64> {
	value.as_i64().ok_or_else(|| field_mismatch(name, "int", value))
}

fn require_u64(name: &str, value: &Decoded) -> Result<u64> {
	value.as_u64().ok_or_else(|| field_mismatch(name, "uint", value))
}

fn require_str(name: &str, value: &Decoded) -> Result<String> {
	value.as_str().map(str::to_owned).ok_or_else(|| field_mismatch(name, "string", value))
}

fn require_enum(name: &str, value: &Decoded) -> Result<EnumMember> {
	match value {
		Decoded::Enum(member) => Ok(*member),
		other => Err(field_mismatch(name, "enum", other)),
	}
}

fn require_point(name: &str, value: &Decoded) -> Result<Point> {
	value.downcast_record::<Point>().cloned().ok_or_else(|| field_mismatch(name, "Point", value))
}

fn field_mismatch(name: &str, target: &str, value: &Decoded) -> CastError {
	CastError::Conversion {
		key: name.to_owned(),
		target: target.to_owned(),
		value: format!("{value:?}"),
	}
}
