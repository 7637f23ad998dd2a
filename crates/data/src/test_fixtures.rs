//! Holder family shared by the unit tests.
//!
//! `Thing` is a closed enum: a gauge with a level and a limit, a label with a
//! level only, and a rock with nothing. `MeterHolder` matches both gauges and
//! labels through the `Meter` trait, which lets tests overlap holder types.

use std::sync::{Arc, LazyLock};

use crate::holder::HolderType;
use crate::key::{Key, KeyDef};
use crate::manipulator::ManipulatorSchema;
use crate::processor::{ManipulatorProcessor, Mutation, ValueProcessor};

pub(crate) const LEVEL: Key<i32> = Key::new(KeyDef::new("test:level", "Level", "meter.level"));
pub(crate) const LIMIT: Key<i32> = Key::new(KeyDef::new("test:limit", "Limit", "meter.limit"));
pub(crate) const LEVEL_TEXT: Key<String> =
	Key::new(KeyDef::new("test:level", "Level", "meter.level"));
pub(crate) const NOTE: Key<String> = Key::new(KeyDef::new("test:note", "Note", "note"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Fault {
	#[default]
	None,
	Error,
	Panic,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Gauge {
	pub level: Option<i32>,
	pub limit: i32,
	pub fault: Fault,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Label {
	pub level: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Thing {
	Gauge(Gauge),
	Label(Label),
	Rock,
}

impl Thing {
	pub(crate) fn gauge(level: Option<i32>, limit: i32) -> Self {
		Self::Gauge(Gauge {
			level,
			limit,
			fault: Fault::None,
		})
	}

	pub(crate) fn faulty_gauge(level: Option<i32>, fault: Fault) -> Self {
		Self::Gauge(Gauge {
			level,
			limit: 100,
			fault,
		})
	}

	pub(crate) fn label(level: i32) -> Self {
		Self::Label(Label { level })
	}
}

pub(crate) trait Meter {
	fn meter_level(&self) -> i32;
	fn set_meter_level(&mut self, level: i32);
}

impl Meter for Gauge {
	fn meter_level(&self) -> i32 {
		self.level.unwrap_or_default()
	}

	fn set_meter_level(&mut self, level: i32) {
		self.level = Some(level);
	}
}

impl Meter for Label {
	fn meter_level(&self) -> i32 {
		self.level
	}

	fn set_meter_level(&mut self, level: i32) {
		self.level = level;
	}
}

pub(crate) struct GaugeHolder;

impl HolderType<Thing> for GaugeHolder {
	type Target = Gauge;
	const NAME: &'static str = "gauge";

	fn narrow(holder: &Thing) -> Option<&Gauge> {
		match holder {
			Thing::Gauge(gauge) => Some(gauge),
			_ => None,
		}
	}

	fn narrow_mut(holder: &mut Thing) -> Option<&mut Gauge> {
		match holder {
			Thing::Gauge(gauge) => Some(gauge),
			_ => None,
		}
	}
}

pub(crate) struct LabelHolder;

impl HolderType<Thing> for LabelHolder {
	type Target = Label;
	const NAME: &'static str = "label";

	fn narrow(holder: &Thing) -> Option<&Label> {
		match holder {
			Thing::Label(label) => Some(label),
			_ => None,
		}
	}

	fn narrow_mut(holder: &mut Thing) -> Option<&mut Label> {
		match holder {
			Thing::Label(label) => Some(label),
			_ => None,
		}
	}
}

pub(crate) struct MeterHolder;

impl HolderType<Thing> for MeterHolder {
	type Target = dyn Meter;
	const NAME: &'static str = "meter";

	fn narrow(holder: &Thing) -> Option<&(dyn Meter + 'static)> {
		match holder {
			Thing::Gauge(gauge) => Some(gauge),
			Thing::Label(label) => Some(label),
			Thing::Rock => None,
		}
	}

	fn narrow_mut(holder: &mut Thing) -> Option<&mut (dyn Meter + 'static)> {
		match holder {
			Thing::Gauge(gauge) => Some(gauge),
			Thing::Label(label) => Some(label),
			Thing::Rock => None,
		}
	}
}

/// Level of a gauge: removable, bounded by the gauge's limit.
pub(crate) struct GaugeLevel;

impl ValueProcessor<Thing> for GaugeLevel {
	type Holder = GaugeHolder;
	type Value = i32;

	fn key(&self) -> Key<i32> {
		LEVEL
	}

	fn get(&self, gauge: &Gauge) -> Option<i32> {
		gauge.level
	}

	fn set(&self, gauge: &mut Gauge, value: i32) -> Mutation {
		match gauge.fault {
			Fault::Panic => panic!("gauge jammed"),
			Fault::Error => return Mutation::from_result(Err::<bool, _>("gauge offline")),
			Fault::None => {}
		}
		if !(0..=gauge.limit).contains(&value) {
			return Mutation::Rejected;
		}
		gauge.level = Some(value);
		Mutation::Applied
	}

	fn remove(&self, gauge: &mut Gauge) -> Mutation {
		if gauge.fault == Fault::Panic {
			panic!("gauge jammed");
		}
		gauge.level = None;
		Mutation::Applied
	}

	fn default_value(&self) -> i32 {
		5
	}
}

/// Limit of a gauge: intrinsic, never negative.
pub(crate) struct GaugeLimit;

impl ValueProcessor<Thing> for GaugeLimit {
	type Holder = GaugeHolder;
	type Value = i32;

	fn key(&self) -> Key<i32> {
		LIMIT
	}

	fn get(&self, gauge: &Gauge) -> Option<i32> {
		Some(gauge.limit)
	}

	fn set(&self, gauge: &mut Gauge, value: i32) -> Mutation {
		if value < 0 {
			return Mutation::Rejected;
		}
		gauge.limit = value;
		Mutation::Applied
	}

	fn default_value(&self) -> i32 {
		10
	}
}

pub(crate) struct LabelLevel;

impl ValueProcessor<Thing> for LabelLevel {
	type Holder = LabelHolder;
	type Value = i32;

	fn key(&self) -> Key<i32> {
		LEVEL
	}

	fn get(&self, label: &Label) -> Option<i32> {
		Some(label.level)
	}

	fn set(&self, label: &mut Label, value: i32) -> Mutation {
		label.level = value;
		Mutation::Applied
	}

	fn default_value(&self) -> i32 {
		5
	}
}

/// Level through the shared `Meter` capability, preferred over the specific ones.
pub(crate) struct MeterLevel;

impl ValueProcessor<Thing> for MeterLevel {
	type Holder = MeterHolder;
	type Value = i32;

	fn key(&self) -> Key<i32> {
		LEVEL
	}

	fn get(&self, meter: &(dyn Meter + 'static)) -> Option<i32> {
		Some(meter.meter_level())
	}

	fn set(&self, meter: &mut (dyn Meter + 'static), value: i32) -> Mutation {
		meter.set_meter_level(value);
		Mutation::Applied
	}

	fn default_value(&self) -> i32 {
		0
	}

	fn priority(&self) -> i16 {
		200
	}
}

/// Level of a label rendered as text, conflicting with `LEVEL`'s value type.
pub(crate) struct LabelText;

impl ValueProcessor<Thing> for LabelText {
	type Holder = LabelHolder;
	type Value = String;

	fn key(&self) -> Key<String> {
		LEVEL_TEXT
	}

	fn get(&self, label: &Label) -> Option<String> {
		Some(label.level.to_string())
	}

	fn set(&self, label: &mut Label, value: String) -> Mutation {
		match value.parse() {
			Ok(level) => {
				label.level = level;
				Mutation::Applied
			}
			Err(_) => Mutation::Rejected,
		}
	}

	fn default_value(&self) -> String {
		String::new()
	}
}

static METER: LazyLock<Arc<ManipulatorSchema>> = LazyLock::new(|| {
	ManipulatorSchema::builder("test:meter")
		.key(LEVEL, 5)
		.key(LIMIT, 10)
		.require(LIMIT)
		.build()
});

static NOTES: LazyLock<Arc<ManipulatorSchema>> = LazyLock::new(|| {
	ManipulatorSchema::builder("test:notes")
		.key(NOTE, String::new())
		.build()
});

pub(crate) fn meter_schema() -> Arc<ManipulatorSchema> {
	METER.clone()
}

pub(crate) fn notes_schema() -> Arc<ManipulatorSchema> {
	NOTES.clone()
}

/// Meter manipulator over gauges (level, limit) and labels (level).
pub(crate) fn meter_processor() -> ManipulatorProcessor<Thing> {
	ManipulatorProcessor::builder(meter_schema())
		.with(GaugeLevel)
		.with(GaugeLimit)
		.with(LabelLevel)
		.build()
		.unwrap()
}
