use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGB8;
use colorstat::{ColorRange, Colormap, RGBColor, stats};

type Err = Box<dyn Error>;

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn table_of_colors(fh: &mut impl Write, colors: &[(f64, RGB8)],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for &(x, c) in colors {
        writeln!(fh, "  <td title=\"{x:.3}\" style=\"width: {width}px; \
                      height: 30px; background-color: {}\"></td>",
                 css_string(c))?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td>\
                  </tr></table><br/>")?;
    Ok(())
}

fn colormap(fh: &mut impl Write, cmap: &Colormap<RGB8>, a: f64, b: f64,
            n: usize, width: u32, comment: &str) -> Result<(), Err> {
    let colors: Vec<_> = cmap.range(a, b, n).collect();
    table_of_colors(fh, &colors, width, comment)
}

fn main() -> Result<(), Err> {
    env_logger::init();
    let mut fh = BufWriter::new(File::create("colormap.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>colorstat: test {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;

    writeln!(fh, "<h3>Segmented colormaps</h3>")?;
    let jet = RGB8::jet();
    colormap(&mut fh, &jet, 0., 1., 10, 43, "jet")?;
    colormap(&mut fh, &jet, 0., 1., 150, 3, "jet")?;
    colormap(&mut fh, &jet, -0.2, 1.2, 150, 3,
             "jet, out-of-bounds values in white")?;
    colormap(&mut fh, &RGB8::spectral(), 0., 1., 150, 3, "spectral")?;
    colormap(&mut fh, &RGB8::histogram_jet(20, 40, None)?, 0., 1., 150, 3,
             "histogram jet, 20 bins, fullest holds 40")?;
    colormap(&mut fh, &RGB8::plate(1000), 0., 0.05, 150, 3,
             "plate counts (first 5%), max bin 1000")?;

    writeln!(fh, "<h3>Z-score coloring</h3>")?;
    let z = RGB8::stdev_jet(3.)?;
    colormap(&mut fh, &z, -4., 4., 81, 6, "stdev jet, bounds ±3")?;

    let wells = [[812., 790., 845., 803.],
                 [640., 655., 610., 702.],
                 [901., 1105., 988., 1012.]];
    let groups: Vec<_> = wells.iter()
        .filter_map(|w| stats::SampleSummary::from_samples(w))
        .collect();
    let pooled = stats::combine(groups.iter().copied())
        .ok_or("no wells")?;
    let stdev = pooled.stdev.ok_or("no spread")?;
    writeln!(fh, "<p>Pooled: {} events, mean {:.1}, stdev {:.1}</p>",
             pooled.count, pooled.mean, stdev)?;
    for (w, g) in wells.iter().zip(&groups) {
        let colors: Vec<_> = w.iter()
            .map(|&x| (x, z.rgb_with_statistics(x, pooled.mean, stdev)))
            .collect();
        let cv = stats::cv_percent(w).unwrap_or(f64::NAN);
        table_of_colors(&mut fh, &colors, 43,
                        &format!("mean {:.1}, CV {cv:.1}%", g.mean))?;
    }

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
