//! Write `legend.html` showing every colormap of a directory.
//!
//! Usage: cargo run --example legend_html -- <dir> [extension]

use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use colormap_legend::{Colormap, ColormapStore, Dimensions, LoadOptions,
                      RGBColor, color_for};
use rgb::RGBA8;

type Err = Box<dyn Error>;

fn css_string(c: RGBA8) -> String {
    format!("rgba({}, {}, {}, {:.3})", c.r, c.g, c.b, c.a as f64 / 255.)
}

fn table_of_colors(fh: &mut impl Write, colors: &[RGBA8],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>",
                 css_string(c))?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {comment}</td></tr><tr>")?;
    for &c in colors {
        let c = c.to_gray();
        writeln!(fh, "  <td style=\"width: {width}px; height: 12px; \
                      background-color: {}\"></td>",
                 css_string(c))?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

/// Sample values from one range width below to one above `[0, 1]`, to
/// show the fade outside the range.
fn ramp(fh: &mut impl Write, colormap: &Colormap, n: usize)
        -> Result<(), Err> {
    let dims = Dimensions::new(0., 1.);
    let dt = 3. / (n - 1) as f64;
    let colors = (0 .. n)
        .map(|i| color_for(colormap, dims, -1. + i as f64 * dt, None)
             .map(RGBA8::from_rgba))
        .collect::<Result<Vec<_>, _>>()?;
    table_of_colors(fh, &colors, 2, "values in [-1, 2] over [0, 1]")
}

fn main() -> Result<(), Err> {
    tracing_subscriber::fmt::init();
    let mut args = env::args().skip(1);
    let dir = args.next().ok_or("usage: legend_html <dir> [extension]")?;
    let mut options = LoadOptions::default();
    if let Some(ext) = args.next() {
        options = options.extension(ext);
    }
    let store = ColormapStore::open(&dir, options)?;
    let registry = store.snapshot();

    let mut fh = BufWriter::new(File::create("legend.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>Colormaps of {dir}</title>\n\
                  </head>\n\
                  <body>")?;
    for name in registry.names() {
        let colormap = registry.lookup(name)?;
        writeln!(fh, "<h3>{name}</h3>")?;
        let stops: Vec<_> = colormap.stops().iter()
            .map(|&c| RGBA8::from_rgba(c))
            .collect();
        table_of_colors(&mut fh, &stops, 40,
                        &format!("{} stops", colormap.len()))?;
        let legend = registry.default_legend(name)?;
        let row = legend.row(0).unwrap_or_default();
        let colors: Vec<RGBA8> = row.iter().map(|&c| RGBA8::from_rgba(c)).collect();
        table_of_colors(&mut fh, &colors, 1, "legend")?;
        ramp(&mut fh, colormap, 150)?;
    }
    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
