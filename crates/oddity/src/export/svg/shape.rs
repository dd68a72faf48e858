//! SVG rendering of single shapes: plain, hatched and partitioned.

use log::{debug, trace};
use svg::node::element as svg_element;

use oddity_core::{
    color::Color,
    draw::{FillPaint, HatchDirection, LayeredOutput, RenderLayer, StrokeDefinition},
};

use super::Svg;
use crate::{
    catalog::{ShapeGeometry, geometry},
    error::OddityError,
    hatch::hatch_lines,
    layout::ShapeSpec,
    partition::{Separator, partition},
};

impl Svg {
    /// Renders a shape with its shading, partition and scattered contents.
    pub(super) fn render_shape(&mut self, shape: &ShapeSpec, seed: u64) -> Result<LayeredOutput, OddityError> {
        let geometry = geometry(shape.kind(), &self.symbols)?;
        let stroke = StrokeDefinition::new(self.palette.black(), self.style.outline_width())
            .with_style(shape.stroke_style());
        debug!(shape = shape.kind().key(), partitioned = shape.partition().is_some(); "Rendering shape");

        let mut output = LayeredOutput::new();
        match shape.partition() {
            Some(spec) => {
                let parts = partition(&geometry, spec)?;
                let clip_id = self.next_clip_id();
                output.add_to_layer(RenderLayer::Base, Box::new(Self::outline_clip(&clip_id, &geometry)));

                for (index, section) in parts.sections().iter().enumerate() {
                    let region = section.region();
                    let fill = match self.palette.resolve(section.shading(), shape.opaque()) {
                        FillPaint::None => continue,
                        FillPaint::Color(color) => {
                            let path = svg_element::Path::new()
                                .set("d", region.to_path_data())
                                .set("fill", color.to_hex())
                                .set("stroke", "none");
                            let path = if region.is_even_odd() {
                                path.set("fill-rule", "evenodd")
                            } else {
                                path
                            };
                            svg_element::Group::new().add(path)
                        }
                        FillPaint::Hatch(direction) => {
                            let section_id = format!("{clip_id}-s{index}");
                            let clip = svg_element::Path::new().set("d", region.to_path_data());
                            let clip = if region.is_even_odd() {
                                clip.set("clip-rule", "evenodd")
                            } else {
                                clip
                            };
                            output.add_to_layer(
                                RenderLayer::Base,
                                Box::new(svg_element::Definitions::new().add(
                                    svg_element::ClipPath::new().set("id", section_id.as_str()).add(clip),
                                )),
                            );
                            svg_element::Group::new().add(self.hatching(&section_id, direction))
                        }
                    };
                    trace!(section = index; "Filled partition section");
                    output.add_to_layer(
                        RenderLayer::Section,
                        Box::new(fill.set("clip-path", format!("url(#{clip_id})"))),
                    );
                }

                self.add_outline(&mut output, &geometry, None, &stroke);

                let separator_stroke = StrokeDefinition::new(self.palette.black(), self.style.separator_width());
                let separators = parts.separators().iter().fold(
                    svg_element::Group::new().set("clip-path", format!("url(#{clip_id})")),
                    |group, separator| match separator {
                        Separator::Line(segment) => group.add(Self::line(*segment, &separator_stroke)),
                        Separator::Path(data) => {
                            let path = svg_element::Path::new()
                                .set("d", data.to_string())
                                .set("fill", "none");
                            group.add(oddity_core::apply_stroke!(path, &separator_stroke))
                        }
                    },
                );
                if !parts.separators().is_empty() {
                    output.add_to_layer(RenderLayer::Separator, Box::new(separators));
                }
            }
            None => match self.palette.resolve(shape.shading(), shape.opaque()) {
                FillPaint::None => self.add_outline(&mut output, &geometry, None, &stroke),
                FillPaint::Color(color) => self.add_outline(&mut output, &geometry, Some(color), &stroke),
                FillPaint::Hatch(direction) => {
                    let clip_id = self.next_clip_id();
                    output.add_to_layer(RenderLayer::Base, Box::new(Self::outline_clip(&clip_id, &geometry)));
                    output.add_to_layer(RenderLayer::Section, Box::new(self.hatching(&clip_id, direction)));
                    self.add_outline(&mut output, &geometry, None, &stroke);
                }
            },
        }

        if let Some(scatter) = shape.scatter() {
            let content = self.render_scatter(scatter, Some(&geometry), seed)?;
            output.merge(content);
        }
        Ok(output)
    }

    /// Adds the outline, filled with `fill`, stroked with `stroke`.
    ///
    /// Shapes with explicit stroke segments get an unstroked fill path and
    /// one line per segment.
    fn add_outline(
        &self,
        output: &mut LayeredOutput,
        geometry: &ShapeGeometry,
        fill: Option<Color>,
        stroke: &StrokeDefinition,
    ) {
        let path = svg_element::Path::new()
            .set("d", geometry.outline().to_string())
            .set("fill", fill.map_or_else(|| "none".to_string(), Color::to_hex));
        let path = if geometry.is_even_odd() {
            path.set("fill-rule", "evenodd")
        } else {
            path
        };

        match geometry.stroke_segments() {
            Some(segments) => {
                if fill.is_some() {
                    output.add_to_layer(RenderLayer::Base, Box::new(path.set("stroke", "none")));
                }
                for segment in segments {
                    output.add_to_layer(RenderLayer::Outline, Box::new(Self::line(*segment, stroke)));
                }
            }
            None => {
                output.add_to_layer(RenderLayer::Outline, Box::new(oddity_core::apply_stroke!(path, stroke)));
            }
        }
    }

    /// Clip path definition of the shape outline
    fn outline_clip(clip_id: &str, geometry: &ShapeGeometry) -> svg_element::Definitions {
        let path = svg_element::Path::new().set("d", geometry.outline().to_string());
        let path = if geometry.is_even_odd() {
            path.set("clip-rule", "evenodd")
        } else {
            path
        };
        svg_element::Definitions::new().add(svg_element::ClipPath::new().set("id", clip_id).add(path))
    }

    /// Canvas-wide hatch lines clipped to `clip_id`
    fn hatching(&self, clip_id: &str, direction: HatchDirection) -> svg_element::Group {
        let stroke = StrokeDefinition::new(self.palette.black(), self.style.hatch_width());
        hatch_lines(direction).into_iter().fold(
            svg_element::Group::new()
                .set("clip-path", format!("url(#{clip_id})"))
                .set("fill", "none"),
            |group, segment| group.add(Self::line(segment, &stroke)),
        )
    }
}
