// ABOUTME: Typed property values captured from widget snapshots
// ABOUTME: Defines the closed set of property kinds and the element tables of composite kinds

use serde::{Deserialize, Serialize};

/// A named property as reported by a widget snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Every property kind a widget can expose.
///
/// Textual and numeric kinds render directly. Composite kinds need an element
/// name (`color.red`, `geometry.width`) and implement [`Composite`].
/// `Palette`, `Brush` and `Unknown` have no textual form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Bool(bool),
    String(String),
    Cstring(String),
    Enum(String),
    Set(String),
    Locale(String),
    Url(String),
    Pixmap(String),
    CursorShape(String),
    Number(i32),
    #[serde(rename = "uint")]
    UInt(u32),
    #[serde(rename = "longlong")]
    LongLong(i64),
    #[serde(rename = "ulonglong")]
    ULongLong(u64),
    Float(f32),
    Double(f64),
    Cursor(i32),
    Char(char),
    Color(Color),
    Font(Font),
    IconSet(IconSet),
    Point(Point),
    #[serde(rename = "pointf")]
    PointF(PointF),
    Rect(Rect),
    #[serde(rename = "rectf")]
    RectF(RectF),
    Size(Size),
    #[serde(rename = "sizef")]
    SizeF(SizeF),
    SizePolicy(SizePolicy),
    Date(Date),
    Time(Time),
    DateTime(DateTime),
    StringList(Vec<String>),
    Palette,
    Brush,
    Unknown,
}

impl PropertyValue {
    /// Human readable kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "Bool",
            PropertyValue::String(_) => "String",
            PropertyValue::Cstring(_) => "Cstring",
            PropertyValue::Enum(_) => "Enum",
            PropertyValue::Set(_) => "Set",
            PropertyValue::Locale(_) => "Locale",
            PropertyValue::Url(_) => "Url",
            PropertyValue::Pixmap(_) => "Pixmap",
            PropertyValue::CursorShape(_) => "CursorShape",
            PropertyValue::Number(_) => "Number",
            PropertyValue::UInt(_) => "UInt",
            PropertyValue::LongLong(_) => "LongLong",
            PropertyValue::ULongLong(_) => "ULongLong",
            PropertyValue::Float(_) => "Float",
            PropertyValue::Double(_) => "Double",
            PropertyValue::Cursor(_) => "Cursor",
            PropertyValue::Char(_) => "Char",
            PropertyValue::Color(_) => Color::KIND,
            PropertyValue::Font(_) => Font::KIND,
            PropertyValue::IconSet(_) => IconSet::KIND,
            PropertyValue::Point(_) => Point::KIND,
            PropertyValue::PointF(_) => PointF::KIND,
            PropertyValue::Rect(_) => Rect::KIND,
            PropertyValue::RectF(_) => RectF::KIND,
            PropertyValue::Size(_) => Size::KIND,
            PropertyValue::SizeF(_) => SizeF::KIND,
            PropertyValue::SizePolicy(_) => SizePolicy::KIND,
            PropertyValue::Date(_) => Date::KIND,
            PropertyValue::Time(_) => Time::KIND,
            PropertyValue::DateTime(_) => DateTime::KIND,
            PropertyValue::StringList(_) => "StringList",
            PropertyValue::Palette => "Palette",
            PropertyValue::Brush => "Brush",
            PropertyValue::Unknown => "Unknown",
        }
    }
}

/// A property value with named sub-elements.
///
/// `ELEMENTS` is the complete list of legal element names, in the order they
/// are shown to the user. Lookup is done on lower-cased names.
pub trait Composite {
    const KIND: &'static str;
    const ELEMENTS: &'static [&'static str];

    /// Textual value of `element`, or `None` if the element does not exist
    fn element(&self, element: &str) -> Option<String>;
}

fn flag(value: bool) -> String {
    value.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Composite for Color {
    const KIND: &'static str = "Color";
    const ELEMENTS: &'static [&'static str] = &["red", "green", "blue"];

    fn element(&self, element: &str) -> Option<String> {
        match element {
            "red" => Some(self.red.to_string()),
            "green" => Some(self.green.to_string()),
            "blue" => Some(self.blue.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    pub family: String,
    pub point_size: i32,
    pub weight: i32,
    pub italic: bool,
    pub bold: bool,
    pub underline: bool,
    pub strike_out: bool,
    pub antialiasing: bool,
    pub style_strategy: String,
    pub kerning: bool,
}

impl Composite for Font {
    const KIND: &'static str = "Font";
    const ELEMENTS: &'static [&'static str] = &[
        "family",
        "pointsize",
        "weight",
        "italic",
        "bold",
        "underline",
        "strikeout",
        "antialiasing",
        "stylestrategy",
        "kerning",
    ];

    fn element(&self, element: &str) -> Option<String> {
        match element {
            "family" => Some(self.family.clone()),
            "pointsize" => Some(self.point_size.to_string()),
            "weight" => Some(self.weight.to_string()),
            "italic" => Some(flag(self.italic)),
            "bold" => Some(flag(self.bold)),
            "underline" => Some(flag(self.underline)),
            "strikeout" => Some(flag(self.strike_out)),
            "antialiasing" => Some(flag(self.antialiasing)),
            "stylestrategy" => Some(self.style_strategy.clone()),
            "kerning" => Some(flag(self.kerning)),
            _ => None,
        }
    }
}

/// Image paths for each icon mode and state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSet {
    pub normal_off: String,
    pub normal_on: String,
    pub disabled_off: String,
    pub disabled_on: String,
    pub active_off: String,
    pub active_on: String,
    pub selected_off: String,
    pub selected_on: String,
}

impl Composite for IconSet {
    const KIND: &'static str = "IconSet";
    const ELEMENTS: &'static [&'static str] = &[
        "normaloff",
        "normalon",
        "disabledoff",
        "disabledon",
        "activeoff",
        "activeon",
        "selectedoff",
        "selectedon",
    ];

    fn element(&self, element: &str) -> Option<String> {
        let path = match element {
            "normaloff" => &self.normal_off,
            "normalon" => &self.normal_on,
            "disabledoff" => &self.disabled_off,
            "disabledon" => &self.disabled_on,
            "activeoff" => &self.active_off,
            "activeon" => &self.active_on,
            "selectedoff" => &self.selected_off,
            "selectedon" => &self.selected_on,
            _ => return None,
        };
        Some(path.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Composite for Point {
    const KIND: &'static str = "Point";
    const ELEMENTS: &'static [&'static str] = &["x", "y"];

    fn element(&self, element: &str) -> Option<String> {
        match element {
            "x" => Some(self.x.to_string()),
            "y" => Some(self.y.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl Composite for PointF {
    const KIND: &'static str = "PointF";
    const ELEMENTS: &'static [&'static str] = &["x", "y"];

    fn element(&self, element: &str) -> Option<String> {
        match element {
            "x" => Some(self.x.to_string()),
            "y" => Some(self.y.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Composite for Rect {
    const KIND: &'static str = "Rect";
    const ELEMENTS: &'static [&'static str] = &["x", "y", "width", "height"];

    fn element(&self, element: &str) -> Option<String> {
        match element {
            "x" => Some(self.x.to_string()),
            "y" => Some(self.y.to_string()),
            "width" => Some(self.width.to_string()),
            "height" => Some(self.height.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Composite for RectF {
    const KIND: &'static str = "RectF";
    const ELEMENTS: &'static [&'static str] = &["x", "y", "width", "height"];

    fn element(&self, element: &str) -> Option<String> {
        match element {
            "x" => Some(self.x.to_string()),
            "y" => Some(self.y.to_string()),
            "width" => Some(self.width.to_string()),
            "height" => Some(self.height.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Composite for Size {
    const KIND: &'static str = "Size";
    const ELEMENTS: &'static [&'static str] = &["width", "height"];

    fn element(&self, element: &str) -> Option<String> {
        match element {
            "width" => Some(self.width.to_string()),
            "height" => Some(self.height.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeF {
    pub width: f64,
    pub height: f64,
}

impl Composite for SizeF {
    const KIND: &'static str = "SizeF";
    const ELEMENTS: &'static [&'static str] = &["width", "height"];

    fn element(&self, element: &str) -> Option<String> {
        match element {
            "width" => Some(self.width.to_string()),
            "height" => Some(self.height.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SizePolicy {
    pub h_size_type: i32,
    pub v_size_type: i32,
    pub hor_stretch: i32,
    pub ver_stretch: i32,
}

impl Composite for SizePolicy {
    const KIND: &'static str = "SizePolicy";
    const ELEMENTS: &'static [&'static str] = &["hsizetype", "vsizetype", "horstretch", "verstretch"];

    fn element(&self, element: &str) -> Option<String> {
        match element {
            "hsizetype" => Some(self.h_size_type.to_string()),
            "vsizetype" => Some(self.v_size_type.to_string()),
            "horstretch" => Some(self.hor_stretch.to_string()),
            "verstretch" => Some(self.ver_stretch.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Composite for Date {
    const KIND: &'static str = "Date";
    const ELEMENTS: &'static [&'static str] = &["year", "month", "day"];

    fn element(&self, element: &str) -> Option<String> {
        match element {
            "year" => Some(self.year.to_string()),
            "month" => Some(self.month.to_string()),
            "day" => Some(self.day.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Time {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Composite for Time {
    const KIND: &'static str = "Time";
    const ELEMENTS: &'static [&'static str] = &["hour", "minute", "second"];

    fn element(&self, element: &str) -> Option<String> {
        match element {
            "hour" => Some(self.hour.to_string()),
            "minute" => Some(self.minute.to_string()),
            "second" => Some(self.second.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Composite for DateTime {
    const KIND: &'static str = "DateTime";
    const ELEMENTS: &'static [&'static str] = &["hour", "minute", "second", "year", "month", "day"];

    fn element(&self, element: &str) -> Option<String> {
        match element {
            "hour" => Some(self.hour.to_string()),
            "minute" => Some(self.minute.to_string()),
            "second" => Some(self.second.to_string()),
            "year" => Some(self.year.to_string()),
            "month" => Some(self.month.to_string()),
            "day" => Some(self.day.to_string()),
            _ => None,
        }
    }
}
