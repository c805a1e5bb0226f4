//! The memoized pattern cache.
//!
//! Compiled matchers are pure, so one compilation per (context, pattern text)
//! pair serves every caller. Keys include the context's unique id: two
//! contexts with different registrations never observe each other's
//! compilations, and repeated requests through the same context return the
//! very same matcher closure.

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::context::Context;
use crate::errors::PatternError;
use crate::matcher::Matcher;

#[derive(Default)]
pub struct PatternCache {
    compiled: DashMap<(u64, String), Matcher>,
}

impl PatternCache {
    pub fn new() -> Self {
        PatternCache::default()
    }

    /// The matcher for `pattern` under `context`, compiling on first use.
    /// Compile errors are not cached; a failing pattern fails afresh each
    /// time it is requested.
    pub fn matcher(&self, context: &Context, pattern: &str) -> Result<Matcher, PatternError> {
        let key = (context.id(), pattern.to_string());
        if let Some(hit) = self.compiled.get(&key) {
            return Ok(hit.clone());
        }

        tracing::debug!(pattern, context = context.id(), "compiling pattern");
        let parsed = stana_sexpr::parse(pattern)?;
        let matcher = context.compile(&parsed)?;
        // A racing writer may have beaten us; keep whichever landed first so
        // all callers share one closure.
        Ok(self.compiled.entry(key).or_insert(matcher).clone())
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    pub fn clear(&self) {
        self.compiled.clear();
    }
}

static GLOBAL: Lazy<PatternCache> = Lazy::new(PatternCache::new);

pub(crate) fn global() -> &'static PatternCache {
    &GLOBAL
}
