use console::Style;
use pinview_core::{RenderFrame, Viewport};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    hidden: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            hidden: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_render_summary(name: &str, viewport: &Viewport, frame: &RenderFrame) {
    let s = Styles::new();
    let image = viewport.image_frame();
    let t = frame.transform;

    println!();
    println!("  {}", s.title.apply_to("Viewport"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(8)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Image"), s.path.apply_to(name));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Natural"),
        s.value.apply_to(format!("{}x{}", image.natural_width, image.natural_height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Display"),
        s.value.apply_to(format!("{:.1}x{:.1}", image.display_width, image.display_height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Container"),
        s.value.apply_to(format!("{:.1}x{:.1}", frame.container.width, frame.container.height))
    );
    println!();

    println!("  {}", s.header.apply_to("Transform"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Scale"),
        s.value.apply_to(format!("{:.4}", t.scale))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Offset"),
        s.value.apply_to(format!("({:.2}, {:.2})", t.offset_x, t.offset_y))
    );
    if let Some(r) = frame.image_rect {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Image rect"),
            s.value.apply_to(format!(
                "{:.2} {:.2} {:.2} {:.2}",
                r.x, r.y, r.width, r.height
            ))
        );
    }
    println!();

    let hidden = viewport
        .annotation_count()
        .saturating_sub(frame.annotations.len());
    if frame.annotations.is_empty() {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Annotations"),
            s.hidden.apply_to("none")
        );
    } else {
        println!("  {}", s.header.apply_to("Annotations"));
        for a in &frame.annotations {
            let r = a.screen_rect;
            println!(
                "    {:>3}. {:<12} {}  {}",
                s.label.apply_to(a.index),
                s.value.apply_to(&a.label.text),
                format!("{:>9.2} {:>9.2} {:>9.2} {:>9.2}", r.x, r.y, r.width, r.height),
                s.label.apply_to(format!("stroke {:.3}", a.stroke_width)),
            );
        }
    }
    if hidden > 0 {
        println!(
            "    {}",
            s.hidden.apply_to(format!("{hidden} hidden"))
        );
    }
    println!();
}
