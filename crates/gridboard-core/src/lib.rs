//! Gridboard Core Types and Definitions
//!
//! This crate provides the value types shared by the Gridboard layout
//! algorithms. It includes:
//!
//! - **Identifiers**: Interned widget identifiers ([`identifier::WidgetId`])
//! - **Ordering**: Integer sort keys for widgets ([`order::OrderKey`])
//! - **Geometry**: Grid cell rectangles and sizes ([`geometry`] module)
//! - **Breakpoints**: Viewport tiers and their column counts ([`breakpoint`] module)
//! - **Widgets**: The widget record tying the above together ([`widget::Widget`])

pub mod breakpoint;
pub mod geometry;
pub mod identifier;
pub mod order;
pub mod widget;
