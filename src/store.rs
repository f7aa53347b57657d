//! Registry of named colormaps loaded from a definitions directory.
//!
//! A [`Registry`] is an immutable snapshot: names, stops and the
//! legends built at load time never change.  A [`ColormapStore`]
//! publishes one snapshot at a time; [`ColormapStore::reload`] builds a
//! new snapshot entirely before swapping it in, so readers holding (or
//! fetching) a snapshot never see a partially loaded registry.

use std::{collections::{BTreeMap, HashMap},
          fs,
          path::{Path, PathBuf},
          sync::{Arc, PoisonError, RwLock}};
use tracing::{debug, trace};
use crate::{Color, Colormap, Dimensions, LegendImage,
            error::{Error, Result},
            interpolate, legend};

/// Where and how to load colormap definitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    extension: String,
    legend_width: usize,
    legend_height: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions { extension: "ncmap".to_owned(),
                      legend_width: 150, legend_height: 150 }
    }
}

impl LoadOptions {
    /// Only files with this extension (without the dot) are loaded.
    /// Default: `"ncmap"`.
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = ext.into();
        self
    }

    /// Size of the legend built for every colormap at load time.
    /// Default: 150 × 150.
    pub fn legend_size(mut self, width: usize, height: usize) -> Self {
        self.legend_width = width;
        self.legend_height = height;
        self
    }

    pub fn get_extension(&self) -> &str { &self.extension }

    pub fn get_legend_size(&self) -> (usize, usize) {
        (self.legend_width, self.legend_height)
    }
}

/// An immutable set of named colormaps together with their legend
/// images at the default size.
#[derive(Debug)]
pub struct Registry {
    colormaps: BTreeMap<String, Colormap>,
    legend_size: (usize, usize),
    legends: HashMap<String, Arc<LegendImage>>,
}

impl Registry {
    /// A registry with no colormap.
    pub fn empty() -> Self {
        Registry { colormaps: BTreeMap::new(),
                   legend_size: LoadOptions::default().get_legend_size(),
                   legends: HashMap::new() }
    }

    /// Register in-memory colormaps under their own names (a later
    /// colormap replaces an earlier one with the same name) and build
    /// their default legends.
    pub fn from_colormaps(colormaps: impl IntoIterator<Item = Colormap>,
                          options: &LoadOptions) -> Result<Self> {
        let colormaps: BTreeMap<_, _> = colormaps.into_iter()
            .map(|c| (c.name().to_owned(), c))
            .collect();
        let (w, h) = options.get_legend_size();
        let mut legends = HashMap::with_capacity(colormaps.len());
        for (name, c) in &colormaps {
            let img = legend::generate(c, w, h)?;
            legends.insert(name.clone(), Arc::new(img));
        }
        Ok(Registry { colormaps, legend_size: (w, h), legends })
    }

    /// Load every file of `dir` carrying the configured extension.  A
    /// colormap is registered under its file name without extension.
    ///
    /// Fails with [`Error::StoreUnavailable`] if `dir` or one of the
    /// files cannot be read, and with [`Error::MalformedColormap`] on
    /// the first unparsable line.  Nothing is returned on failure.
    pub fn load_all(dir: impl AsRef<Path>, options: &LoadOptions)
                    -> Result<Self> {
        let dir = dir.as_ref();
        let unavailable = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| Error::StoreUnavailable { path, source }
        };
        let mut colormaps = Vec::new();
        for entry in fs::read_dir(dir).map_err(unavailable(dir))? {
            let path = entry.map_err(unavailable(dir))?.path();
            if !path.is_file()
                || path.extension().map_or(true, |e| e != options.extension.as_str()) {
                continue
            }
            // Names must be unique: a lossy conversion could merge two
            // non UTF-8 file names.
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                trace!(path = %path.display(), "skipped non UTF-8 file name");
                continue
            };
            let text = fs::read_to_string(&path).map_err(unavailable(&path))?;
            let stops = crate::colormap::parse_stops(&text)
                .map_err(|line| Error::MalformedColormap {
                    file: path.clone(), line })?;
            trace!(name = %name, stops = stops.len(), "parsed colormap");
            colormaps.extend(Colormap::from_stops(name, stops));
        }
        let registry = Self::from_colormaps(colormaps, options)?;
        debug!(dir = %dir.display(), colormaps = registry.len(),
               "loaded colormaps");
        Ok(registry)
    }

    /// Number of registered colormaps.
    pub fn len(&self) -> usize { self.colormaps.len() }

    pub fn is_empty(&self) -> bool { self.colormaps.is_empty() }

    /// All registered names, in lexicographic order.
    pub fn names(&self) -> Vec<&str> {
        self.colormaps.keys().map(String::as_str).collect()
    }

    /// Position of `name` in [`Registry::names`].
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.colormaps.keys().position(|n| n == name)
    }

    /// The colormap registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<&Colormap> {
        self.colormaps.get(name)
            .ok_or_else(|| Error::UnknownColormap { name: name.to_owned() })
    }

    /// [`interpolate::color_for`] on the colormap registered under
    /// `name`.
    pub fn color_for(&self, name: &str, dims: Dimensions, value: f64,
                     fill_value: Option<f64>) -> Result<Color> {
        interpolate::color_for(self.lookup(name)?, dims, value, fill_value)
    }

    /// The legend of `name` at the default size, built at load time.
    pub fn default_legend(&self, name: &str) -> Result<Arc<LegendImage>> {
        self.legends.get(name).cloned()
            .ok_or_else(|| Error::UnknownColormap { name: name.to_owned() })
    }

    /// The legend of `name` at the given size.  Only default-size
    /// legends are kept; any other size is generated on each call.
    pub fn legend(&self, name: &str, width: usize, height: usize)
                  -> Result<Arc<LegendImage>> {
        if (width, height) == self.legend_size {
            return self.default_legend(name)
        }
        Ok(Arc::new(legend::generate(self.lookup(name)?, width, height)?))
    }
}

/// A shared handle on the current [`Registry`] of a definitions
/// directory.
///
/// Readers call [`ColormapStore::snapshot`] and work on the returned
/// registry for as long as they like; [`ColormapStore::reload`]
/// replaces it atomically.
#[derive(Debug)]
pub struct ColormapStore {
    dir: PathBuf,
    options: LoadOptions,
    current: RwLock<Arc<Registry>>,
}

impl ColormapStore {
    /// Load `dir` and publish the result.
    pub fn open(dir: impl Into<PathBuf>, options: LoadOptions) -> Result<Self> {
        let dir = dir.into();
        let registry = Registry::load_all(&dir, &options)?;
        Ok(ColormapStore { dir, options,
                           current: RwLock::new(Arc::new(registry)) })
    }

    /// A store on `dir` publishing an empty registry until the first
    /// successful [`ColormapStore::reload`].
    pub fn unloaded(dir: impl Into<PathBuf>, options: LoadOptions) -> Self {
        ColormapStore { dir: dir.into(), options,
                        current: RwLock::new(Arc::new(Registry::empty())) }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    pub fn options(&self) -> &LoadOptions { &self.options }

    /// The registry currently published.
    pub fn snapshot(&self) -> Arc<Registry> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Load the directory again and, on success, publish the new
    /// registry.  On failure the previous registry stays published.
    pub fn reload(&self) -> Result<Arc<Registry>> {
        let registry = Arc::new(Registry::load_all(&self.dir, &self.options)?);
        self.publish(Arc::clone(&registry));
        Ok(registry)
    }

    /// Publish `registry` in place of the current one.
    pub fn replace(&self, registry: Registry) {
        self.publish(Arc::new(registry))
    }

    fn publish(&self, registry: Arc<Registry>) {
        trace!(colormaps = registry.len(), "publishing colormap registry");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = registry;
    }
}
