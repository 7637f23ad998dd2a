//! Serialized-state boundary.
//!
//! Persistence formats live outside this crate; the core only needs to read a
//! value at a dotted path. [`DataView`] is that read contract and
//! [`DataContainer`] a JSON-backed implementation used for tests, defaults and
//! [`crate::Manipulator::to_container`].

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as Json};

use crate::error::DataError;


/// Dotted path into a container (`"food.level"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataQuery {
	raw: Box<str>,
	segments: Vec<Box<str>>,
}

impl DataQuery {
	/// Parses a dotted path. Empty paths and empty segments are rejected.
	pub fn parse(path: &str) -> Result<Self, DataError> {
		if path.is_empty() {
			return Err(DataError::InvalidQuery(path.to_string()));
		}
		let segments: Vec<Box<str>> = path.split('.').map(Box::from).collect();
		if segments.iter().any(|s| s.is_empty()) {
			return Err(DataError::InvalidQuery(path.to_string()));
		}
		Ok(Self {
			raw: Box::from(path),
			segments,
		})
	}

	pub fn as_str(&self) -> &str {
		&self.raw
	}

	pub fn segments(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().map(|s| &**s)
	}
}

impl fmt::Display for DataQuery {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.raw)
	}
}

/// Read access to a serialized-state container.
pub trait DataView {
	/// Returns the raw value stored at `query`, if any.
	fn get_raw(&self, query: &DataQuery) -> Option<&Json>;

	fn contains(&self, query: &DataQuery) -> bool {
		self.get_raw(query).is_some()
	}

	/// Reads and converts the value at `query`. Absent values are `Ok(None)`.
	fn get<T: DeserializeOwned>(&self, query: &DataQuery) -> Result<Option<T>, DataError>
	where
		Self: Sized,
	{
		let Some(raw) = self.get_raw(query) else {
			return Ok(None);
		};
		serde_json::from_value(raw.clone())
			.map(Some)
			.map_err(|err| DataError::Container {
				query: query.to_string(),
				reason: err.to_string(),
			})
	}
}

/// In-memory nested container backed by a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataContainer {
	root: Map<String, Json>,
}

impl DataContainer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Wraps an existing JSON document. The document must be an object.
	pub fn from_json(json: Json) -> Result<Self, DataError> {
		match json {
			Json::Object(root) => Ok(Self { root }),
			other => Err(DataError::Container {
				query: String::new(),
				reason: format!("expected an object at the root, found {other}"),
			}),
		}
	}

	/// Serializes `value` and stores it at `query`, creating intermediate objects.
	pub fn set<T: Serialize + ?Sized>(
		&mut self,
		query: &DataQuery,
		value: &T,
	) -> Result<&mut Self, DataError> {
		let json = serde_json::to_value(value).map_err(|err| DataError::Container {
			query: query.to_string(),
			reason: err.to_string(),
		})?;
		self.set_raw(query, json)
	}

	pub fn set_raw(&mut self, query: &DataQuery, value: Json) -> Result<&mut Self, DataError> {
		let mut segments = query.segments.iter().peekable();
		let mut node = &mut self.root;
		while let Some(segment) = segments.next() {
			if segments.peek().is_none() {
				node.insert(segment.to_string(), value);
				break;
			}
			let child = node
				.entry(segment.to_string())
				.or_insert_with(|| Json::Object(Map::new()));
			node = match child {
				Json::Object(map) => map,
				_ => {
					return Err(DataError::Container {
						query: query.to_string(),
						reason: format!("segment {segment:?} is not an object"),
					});
				}
			};
		}
		Ok(self)
	}

	pub fn as_json(&self) -> &Map<String, Json> {
		&self.root
	}

	pub fn into_json(self) -> Json {
		Json::Object(self.root)
	}

	pub fn is_empty(&self) -> bool {
		self.root.is_empty()
	}
}

impl DataView for DataContainer {
	fn get_raw(&self, query: &DataQuery) -> Option<&Json> {
		let mut segments = query.segments();
		let mut node = self.root.get(segments.next()?)?;
		for segment in segments {
			node = node.as_object()?.get(segment)?;
		}
		Some(node)
	}
}
