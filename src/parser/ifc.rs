use crate::error::ParseError;
use crate::model::Model;
use crate::parser::step::StepFile;
use std::path::Path;

/// Opens an IFC file and builds a queryable [`Model`].
///
/// Supports IFC2x3 and IFC4 STEP files. The model indexes:
/// - instances by id and by entity type
/// - rooted instances by GlobalId
/// - spatial containment, aggregation and definition relationships as
///   inverse attributes
///
/// # Errors
///
/// Returns [`ParseError::FileRead`] if the file cannot be read.
/// Returns [`ParseError::InvalidStep`] if the STEP format is malformed.
///
/// # Example
///
/// ```no_run
/// use ifc_treeview::parser::open;
///
/// let model = open("model.ifc")?;
/// for project in model.by_type("IfcProject") {
///     println!("{}", project.name().unwrap_or_default());
/// }
/// # Ok::<(), ifc_treeview::error::ParseError>(())
/// ```
pub fn open<P: AsRef<Path>>(path: P) -> Result<Model, ParseError> {
    let content = std::fs::read_to_string(&path).map_err(|source| ParseError::FileRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;

    parse_model(&content)
}

/// Builds a [`Model`] from IFC file content already in memory.
pub fn parse_model(content: &str) -> Result<Model, ParseError> {
    let step_file = StepFile::parse(content)?;
    let model = Model::from_step(step_file);

    tracing::info!(
        file_name = model.file_name(),
        schema = model.schema(),
        instances = model.len(),
        "loaded IFC model"
    );

    Ok(model)
}

/// Opens `path` if it names an existing file.
///
/// A missing file is not an error: the viewer simply has nothing to show
/// and `Ok(None)` is returned.
pub fn load_if_present<P: AsRef<Path>>(path: P) -> Result<Option<Model>, ParseError> {
    let path = path.as_ref();
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "IFC file not found, nothing to show");
        return Ok(None);
    }

    open(path).map(Some)
}
