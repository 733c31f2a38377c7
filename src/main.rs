use anyhow::Context;
use epma_maps::{
    render::{FigureOptions, GridOptions},
    DatasetLoader, Limits, MapSeries,
};
use std::path::PathBuf;
use structopt::StructOpt;

fn parse_pair(arg: &str, sep: char) -> anyhow::Result<(String, String)> {
    arg.split_once(sep)
        .map(|(a, b)| (a.trim().to_string(), b.trim().to_string()))
        .with_context(|| format!("expected a `{sep}` separated pair, found {arg:?}"))
}
fn parse_floats(arg: &str) -> anyhow::Result<(f64, f64)> {
    let (a, b) = parse_pair(arg, ',')?;
    Ok((a.parse()?, b.parse()?))
}
fn parse_size(arg: &str) -> anyhow::Result<(f64, f64)> {
    let (a, b) = parse_pair(&arg.to_lowercase(), 'x')?;
    Ok((a.parse()?, b.parse()?))
}
fn parse_grid(arg: &str) -> anyhow::Result<(usize, usize)> {
    let (a, b) = parse_pair(&arg.to_lowercase(), 'x')?;
    Ok((a.parse()?, b.parse()?))
}
fn parse_range(arg: &str) -> anyhow::Result<(String, (f64, f64))> {
    let (element, range) = parse_pair(arg, '=')?;
    Ok((element, parse_floats(&range)?))
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "epma-maps",
    about = "EPMA element maps to false-color images"
)]
struct Opt {
    /// Path to the map export directory
    #[structopt(parse(from_os_str))]
    path: PathBuf,
    /// Elements to leave out
    #[structopt(short = "x", long, use_delimiter = true)]
    exclude: Vec<String>,
    /// Basename of the image files
    #[structopt(long, default_value = "map")]
    label: String,
    /// Output directory
    #[structopt(short, long, parse(from_os_str), default_value = ".")]
    output: PathBuf,
    /// Map pixel size along x and y: X,Y
    #[structopt(short, long, parse(try_from_str = parse_floats), default_value = "1,1")]
    pixel_size: (f64, f64),
    /// Length unit of the pixel size
    #[structopt(long, default_value = "µm")]
    unit: String,
    /// Colormaps cycled through in element order, e.g. Purples,Blues,Greens
    #[structopt(short, long, use_delimiter = true)]
    color_map: Vec<String>,
    /// Display ranges CSV file with header element,min,max
    #[structopt(short, long, parse(from_os_str))]
    limits: Option<PathBuf>,
    /// Element display range: ELEMENT=MIN,MAX
    #[structopt(short, long, parse(try_from_str = parse_range))]
    range: Vec<(String, (f64, f64))>,
    /// Combined figure grid layout: ROWSxCOLUMNS
    #[structopt(short, long, parse(try_from_str = parse_grid))]
    grid: Option<(usize, usize)>,
    /// Combined figure size in inches: WIDTHxHEIGHT
    #[structopt(long, parse(try_from_str = parse_size))]
    figure_size: Option<(f64, f64)>,
    /// Horizontal space between the combined figure cells
    #[structopt(long, default_value = "0.2")]
    wspace: f64,
    /// Vertical space between the combined figure cells
    #[structopt(long, default_value = "0.2")]
    hspace: f64,
    /// Image file extension
    #[structopt(short, long, default_value = ".png")]
    extension: String,
    /// Image resolution
    #[structopt(long, default_value = "300")]
    dpi: u32,
    /// Font size in points
    #[structopt(long, default_value = "10")]
    font_size: f64,
    /// Map data file extension
    #[structopt(long, default_value = "txt")]
    data_extension: String,
    /// Map metadata file extension
    #[structopt(long, default_value = "pm")]
    metadata_extension: String,
    /// Only prints the rendering plan
    #[structopt(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let dataset = DatasetLoader::default()
        .data_path(&opt.path)
        .exclude(opt.exclude)
        .data_extension(opt.data_extension)
        .metadata_extension(opt.metadata_extension)
        .load()
        .with_context(|| format!("failed to load the maps in {:?}", opt.path))?;
    println!("{dataset}");

    let mut limits = match &opt.limits {
        Some(path) => Limits::from_path(path)
            .with_context(|| format!("failed to read the limits in {path:?}"))?,
        None => Limits::default(),
    };
    for (element, range) in opt.range {
        limits.insert(element, range)?;
    }

    let mut figure = FigureOptions::default();
    if let Some((width, height)) = opt.figure_size {
        figure = figure.size(width, height);
    }
    let mut series = MapSeries::default()
        .label(opt.label)
        .output_dir(opt.output)
        .pixel_size(opt.pixel_size.0, opt.pixel_size.1)
        .length_unit(opt.unit)
        .limits(limits)
        .extension(opt.extension)
        .dpi(opt.dpi)
        .font_size(opt.font_size)
        .figure_options(figure)
        .grid_options(GridOptions::default().wspace(opt.wspace).hspace(opt.hspace));
    if !opt.color_map.is_empty() {
        series = series.color_maps(&opt.color_map)?;
    }
    if let Some((rows, cols)) = opt.grid {
        series = series.figure_grid(rows, cols);
    }

    if opt.dry_run {
        let plan = series.plan(&dataset)?;
        for panel in &plan.panels {
            println!(
                "{:>4}: {:<12} {:<24} -> {:?}",
                panel.element,
                panel.colormap.to_string(),
                panel.range.to_string(),
                panel.path
            );
        }
        if let Some(combined) = &plan.combined {
            let (rows, cols) = combined.layout.shape();
            println!("{rows}x{cols} grid -> {:?}", combined.path);
        }
        return Ok(());
    }
    series.render(&dataset)?;

    Ok(())
}
