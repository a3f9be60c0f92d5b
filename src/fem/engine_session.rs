use super::AnalysisEngine;
use crate::StrError;
use std::ops::{Deref, DerefMut};

/// Grants exclusive access to a freshly reset analysis engine for a single model build
///
/// Opening the session resets the engine and declares an empty 1-D axial model (one DOF
/// per node). Dropping the session resets the engine again, on every exit path, so
/// the next build never sees nodes, elements, or tags from a previous one.
///
/// # Examples
///
/// ```
/// use pilecal::base::{Config, Dof};
/// use pilecal::fem::{AnalysisEngine, AxialEngine, EngineSession};
///
/// let config = Config::new();
/// let mut engine = AxialEngine::new(&config).unwrap();
/// {
///     let mut session = EngineSession::open(&mut engine).unwrap();
///     session.create_node(1, 0.0).unwrap();
///     session.restrain(1, Dof::Uz).unwrap();
/// }
/// assert!(engine.is_empty());
/// ```
pub struct EngineSession<'a, E: AnalysisEngine + ?Sized> {
    engine: &'a mut E,
}

impl<'a, E: AnalysisEngine + ?Sized> EngineSession<'a, E> {
    /// Resets the engine and declares a new 1-D axial model
    pub fn open(engine: &'a mut E) -> Result<Self, StrError> {
        engine.reset();
        let session = EngineSession { engine };
        session.engine.define_model(1)?;
        Ok(session)
    }
}

impl<'a, E: AnalysisEngine + ?Sized> Deref for EngineSession<'a, E> {
    type Target = E;
    fn deref(&self) -> &Self::Target {
        self.engine
    }
}

impl<'a, E: AnalysisEngine + ?Sized> DerefMut for EngineSession<'a, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.engine
    }
}

impl<'a, E: AnalysisEngine + ?Sized> Drop for EngineSession<'a, E> {
    fn drop(&mut self) {
        self.engine.reset();
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
