// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Zero-sized stand-ins used when the `profiling` feature is disabled
//!
//! Every type and function mirrors the instrumented API so callers compile
//! unchanged; nothing here reads the clock or allocates.

use std::borrow::Cow;
use std::marker::PhantomData;

use crate::clock::{Clock, Micros, Ticks};
use crate::config::ReportConfig;
use crate::error::InstrumentResult;
use crate::report::Report;

#[derive(Debug, Default)]
pub struct RegistryBuilder;

impl RegistryBuilder {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }

    #[inline(always)]
    pub fn config(self, _config: ReportConfig) -> Self {
        self
    }

    #[inline(always)]
    pub fn clock(self, _clock: impl Clock + 'static) -> Self {
        self
    }

    #[inline(always)]
    pub fn start(self) -> InstrumentResult<Registry> {
        Ok(Registry)
    }
}

#[derive(Debug)]
pub struct Registry;

impl Registry {
    #[inline(always)]
    pub fn start() -> InstrumentResult<Self> {
        Ok(Self)
    }

    #[inline(always)]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder
    }

    #[inline(always)]
    pub fn is_running(&self) -> bool {
        false
    }

    #[inline(always)]
    pub fn now(&self) -> Ticks {
        0
    }

    #[inline(always)]
    pub fn elapsed(&self) -> Micros {
        0
    }

    #[inline(always)]
    pub fn record(&self, _label: &str, _sample: Micros) -> InstrumentResult<()> {
        Ok(())
    }

    #[inline(always)]
    pub fn timer(&self, _label: impl Into<Cow<'static, str>>) -> ScopeTimer<&Self> {
        ScopeTimer(PhantomData)
    }

    #[inline(always)]
    pub fn try_timer(
        &self,
        _label: impl Into<Cow<'static, str>>,
    ) -> InstrumentResult<ScopeTimer<&Self>> {
        Ok(ScopeTimer(PhantomData))
    }

    #[inline(always)]
    pub fn snapshot(&self) -> InstrumentResult<Report> {
        Ok(Report::default())
    }

    #[inline(always)]
    pub fn stop(&self) -> InstrumentResult<Report> {
        Ok(Report::default())
    }
}

#[derive(Debug)]
pub struct ScopeTimer<R>(PhantomData<R>);

impl<R> ScopeTimer<R> {
    #[inline(always)]
    pub fn new(_registry: R, _label: impl Into<Cow<'static, str>>) -> Self {
        Self(PhantomData)
    }

    #[inline(always)]
    pub fn try_new(
        _registry: R,
        _label: impl Into<Cow<'static, str>>,
    ) -> InstrumentResult<Self> {
        Ok(Self(PhantomData))
    }

    #[inline(always)]
    pub fn label(&self) -> &str {
        ""
    }

    #[inline(always)]
    pub fn elapsed(&self) -> Micros {
        0
    }
}

pub mod global {
    use std::borrow::Cow;
    use std::marker::PhantomData;
    use std::sync::Arc;

    use super::{Registry, ScopeTimer};
    use crate::clock::Micros;
    use crate::config::ReportConfig;
    use crate::error::InstrumentResult;
    use crate::report::Report;

    #[inline(always)]
    pub fn start() -> InstrumentResult<()> {
        Ok(())
    }

    #[inline(always)]
    pub fn start_with(_config: ReportConfig) -> InstrumentResult<()> {
        Ok(())
    }

    #[inline(always)]
    pub fn stop() -> InstrumentResult<Report> {
        Ok(Report::default())
    }

    #[inline(always)]
    pub fn is_running() -> bool {
        false
    }

    #[inline(always)]
    pub fn current() -> Option<Arc<Registry>> {
        None
    }

    #[inline(always)]
    pub fn record(_label: &str, _sample: Micros) -> InstrumentResult<()> {
        Ok(())
    }

    #[inline(always)]
    pub fn timer(_label: impl Into<Cow<'static, str>>) -> ScopeTimer<Arc<Registry>> {
        ScopeTimer(PhantomData)
    }

    #[inline(always)]
    pub fn try_timer(
        _label: impl Into<Cow<'static, str>>,
    ) -> InstrumentResult<ScopeTimer<Arc<Registry>>> {
        Ok(ScopeTimer(PhantomData))
    }

    #[inline(always)]
    pub fn run() -> InstrumentResult<RunGuard> {
        Ok(RunGuard)
    }

    #[inline(always)]
    pub fn run_with(_config: ReportConfig) -> InstrumentResult<RunGuard> {
        Ok(RunGuard)
    }

    #[derive(Debug)]
    pub struct RunGuard;

    impl RunGuard {
        #[inline(always)]
        pub fn finish(self) -> InstrumentResult<Report> {
            Ok(Report::default())
        }
    }
}
