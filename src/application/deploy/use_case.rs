//! Deploy Use Case
//!
//! Orchestrates the deployment flow:
//! 1. Authenticate and register resource providers
//! 2. Ensure the resource group exists
//! 3. Deploy the consortium template
//! 4. Rewrite the supply-chain parameters and deploy that template
//! 5. Wait for the blockchain node, then deploy the contract
//! 6. Patch the API and web app settings
//!
//! Each step is fatal or recoverable (`Step::policy`). A recoverable
//! failure skips the steps that need its result and leaves the run
//! `Partial`; a fatal one stops the run.

use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::{AppSettings, ContractOutcome, DeploymentOutputs, ParameterFile};
use crate::domain::ports::{
    AppTarget, CloudPlatform, ContractDeployer, ContractRequest, DeployEvent, DeployEventSink,
    NodeProbe, NoopEventSink, NonInteractivePrompt, ParameterStore, RegionPrompt, Sleeper,
    TemplateDeployment,
};
use crate::domain::services::{
    parse_contract_output, resolve_vnet_name, rewrite_parameters, wait_until_ready,
};
use crate::domain::value_objects::{ResourceGroup, Secret, Step, StepPolicy};
use crate::error::{ScdeployError, ScdeployResult};

use super::options::DeployOptions;
use super::result::{DeployResult, StepRecord, StepStatus};

const STORAGE_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// Deploy use case - orchestrates the deployment flow
///
/// Parameterized by its ports so tests can run it against in-memory fakes.
pub struct DeployUseCase<P, C, S>
where
    P: CloudPlatform,
    C: ContractDeployer,
    S: ParameterStore,
{
    platform: P,
    contract_deployer: C,
    parameter_store: S,
    probe: Box<dyn NodeProbe>,
    sleeper: Box<dyn Sleeper>,
    prompt: Box<dyn RegionPrompt>,
}

impl<P, C, S> DeployUseCase<P, C, S>
where
    P: CloudPlatform,
    C: ContractDeployer,
    S: ParameterStore,
{
    pub fn new(
        platform: P,
        contract_deployer: C,
        parameter_store: S,
        probe: Box<dyn NodeProbe>,
        sleeper: Box<dyn Sleeper>,
    ) -> Self {
        Self {
            platform,
            contract_deployer,
            parameter_store,
            probe,
            sleeper,
            prompt: Box::new(NonInteractivePrompt),
        }
    }

    /// Use `prompt` to ask for a region when the group has to be created
    pub fn with_prompt(mut self, prompt: Box<dyn RegionPrompt>) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn contract_deployer(&self) -> &C {
        &self.contract_deployer
    }

    /// Execute the deploy use case
    pub fn execute(&self, options: &DeployOptions) -> DeployResult {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the deploy use case with event reporting
    pub fn execute_with_events(
        &self,
        options: &DeployOptions,
        event_sink: Arc<dyn DeployEventSink>,
    ) -> DeployResult {
        let mut pipeline = Pipeline::new(event_sink);
        pipeline.emit(DeployEvent::Started {
            resource_group: options.resource_group.name.clone(),
            deployment_name: options.deployment_name.clone(),
            step_count: Step::ALL.len(),
        });

        // A `Stop` has already been recorded in the result.
        let _ = self.drive(options, &mut pipeline);
        pipeline.finish()
    }

    fn drive(&self, options: &DeployOptions, p: &mut Pipeline) -> Result<(), Stop> {
        let consortium_params = self
            .load_if_present(&options.consortium_parameters)
            .map_err(|e| p.abort(e))?;
        let password = self
            .account_password(options, consortium_params.as_ref())
            .map_err(|e| p.abort(e))?;
        p.secrets.push(password.clone());

        p.run(Step::Authenticate, |_| {
            self.platform.authenticate(&options.subscription_id)?;
            Ok(((), format!("subscription {}", options.subscription_id)))
        })?;

        p.run(Step::RegisterProviders, |p| {
            for namespace in &options.providers {
                self.platform.register_provider(namespace)?;
                p.emit(DeployEvent::ProviderRegistered {
                    namespace: namespace.clone(),
                });
            }
            Ok(((), format!("{} namespaces", options.providers.len())))
        })?;

        p.run(Step::EnsureResourceGroup, |_| {
            self.ensure_resource_group(&options.resource_group)
        })?;

        let (consortium_outputs, rpc_endpoint) = required(p.run(Step::DeployConsortium, |p| {
            let deployment = options.consortium_deployment();
            let outputs = self.deploy_template(
                p,
                options,
                &deployment,
                &options.consortium_template,
                &options.consortium_parameters,
            )?;
            let rpc = required_output(&outputs, &options.outputs.rpc_endpoint, &deployment)?;
            let detail = format!("{} outputs, rpc endpoint {}", outputs.len(), rpc);
            Ok(((outputs, rpc), detail))
        })?)?;
        p.result.rpc_endpoint = Some(rpc_endpoint.clone());

        if self.parameter_store.exists(&options.supplychain_parameters) {
            p.run(Step::RewriteParameters, |p| {
                self.rewrite_supplychain_parameters(
                    p,
                    options,
                    consortium_params.as_ref(),
                    &password,
                    &consortium_outputs,
                )
            })?;
        } else {
            p.skip(
                Step::RewriteParameters,
                format!(
                    "no parameter file at {}",
                    options.supplychain_parameters.display()
                ),
            );
        }

        let supplychain_outputs = p.run(Step::DeploySupplyChain, |p| {
            let outputs = self.deploy_template(
                p,
                options,
                &options.supplychain_deployment(),
                &options.supplychain_template,
                &options.supplychain_parameters,
            )?;
            let detail = format!("{} outputs", outputs.len());
            Ok((outputs, detail))
        })?;

        match &options.readiness {
            Some(policy) => {
                p.run(Step::WaitForNode, |p| {
                    let max_attempts = policy.max_attempts.max(1);
                    let attempts = wait_until_ready(
                        self.probe.as_ref(),
                        self.sleeper.as_ref(),
                        policy,
                        &rpc_endpoint,
                        |attempt| {
                            p.emit(DeployEvent::ReadinessProbe {
                                attempt: attempt.attempt,
                                max_attempts,
                                ready: attempt.ready,
                                next_delay: attempt.next_delay,
                                message: attempt.message.clone(),
                            })
                        },
                    )?;
                    Ok(((), format!("node answered on attempt {}", attempts)))
                })?;
            }
            None => p.skip(Step::WaitForNode, "readiness wait disabled"),
        }

        let contract = p.run(Step::DeployContract, |p| {
            self.deploy_contract(p, options, &rpc_endpoint, &password)
        })?;

        match (&supplychain_outputs, &contract) {
            (None, _) => p.skip(Step::PatchApiSettings, failed(Step::DeploySupplyChain)),
            (_, None) => p.skip(Step::PatchApiSettings, failed(Step::DeployContract)),
            (Some(outputs), Some((account, contract_address))) => {
                p.run(Step::PatchApiSettings, |p| {
                    let deployment = options.supplychain_deployment();
                    let api_app = required_output(outputs, &options.outputs.api_app, &deployment)?;
                    let storage =
                        required_output(outputs, &options.outputs.storage_account, &deployment)?;
                    let key = self
                        .platform
                        .storage_account_key(&options.resource_group.name, &storage)?;
                    p.secrets.push(key.clone());

                    let overrides = AppSettings::new()
                        .with("ContractAddress", contract_address.as_str())
                        .with("AccountAddress", account.as_str())
                        .with("AccountPassword", password.expose())
                        .with("Gas", options.gas.as_str())
                        .with("RpcEndpoint", rpc_endpoint.as_str())
                        .with(
                            "StorageConnectionString",
                            storage_connection_string(&storage, &key),
                        );
                    self.patch_settings(p, options, &api_app, &overrides)
                })?;
            }
        }

        match &supplychain_outputs {
            None => p.skip(Step::PatchWebSettings, failed(Step::DeploySupplyChain)),
            Some(outputs) => {
                p.run(Step::PatchWebSettings, |p| {
                    let deployment = options.supplychain_deployment();
                    let api_app = required_output(outputs, &options.outputs.api_app, &deployment)?;
                    let web_app = required_output(outputs, &options.outputs.web_app, &deployment)?;
                    let api_host = self
                        .platform
                        .web_app_hostname(&options.resource_group.name, &api_app)?;

                    let overrides = AppSettings::new()
                        .with("ApiEndpoint", format!("https://{}", api_host))
                        .with("RpcEndpoint", rpc_endpoint.as_str());
                    self.patch_settings(p, options, &web_app, &overrides)
                })?;
            }
        }

        Ok(())
    }

    fn load_if_present(&self, path: &Path) -> ScdeployResult<Option<ParameterFile>> {
        if self.parameter_store.exists(path) {
            self.parameter_store.load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// The explicit password, else the one in the consortium parameters.
    /// Checked before anything touches the cloud.
    fn account_password(
        &self,
        options: &DeployOptions,
        consortium_params: Option<&ParameterFile>,
    ) -> ScdeployResult<Secret> {
        if let Some(password) = options.account_password.as_ref().filter(|p| !p.is_empty()) {
            return Ok(password.clone());
        }

        consortium_params
            .and_then(|f| f.str_value(&options.parameter_keys.password))
            .filter(|s| !s.is_empty())
            .map(Secret::new)
            .ok_or_else(|| {
                ScdeployError::missing_input(
                    "account password",
                    format!(
                        "set '{}' in {} or pass --account-password",
                        options.parameter_keys.password,
                        options.consortium_parameters.display()
                    ),
                )
            })
    }

    fn ensure_resource_group(&self, group: &ResourceGroup) -> ScdeployResult<((), String)> {
        if self.platform.resource_group_exists(&group.name)? {
            return Ok(((), format!("'{}' already exists", group.name)));
        }

        let region = match &group.region {
            Some(region) => region.clone(),
            None => self.prompt.prompt_region(&group.name)?,
        };
        self.platform.create_resource_group(&group.name, &region)?;
        Ok(((), format!("created '{}' in {}", group.name, region)))
    }

    fn deploy_template(
        &self,
        p: &Pipeline,
        options: &DeployOptions,
        name: &str,
        template: &Path,
        parameters: &Path,
    ) -> ScdeployResult<DeploymentOutputs> {
        let request = TemplateDeployment {
            resource_group: options.resource_group.name.clone(),
            name: name.to_string(),
            template: template.to_path_buf(),
            parameters: self
                .parameter_store
                .exists(parameters)
                .then(|| parameters.to_path_buf()),
        };
        p.emit(DeployEvent::TemplateSubmitted {
            deployment: request.name.clone(),
            template: request.template.clone(),
            parameters: request.parameters.clone(),
        });
        self.platform.deploy_template(&request)
    }

    fn rewrite_supplychain_parameters(
        &self,
        p: &Pipeline,
        options: &DeployOptions,
        consortium_params: Option<&ParameterFile>,
        password: &Secret,
        consortium_outputs: &DeploymentOutputs,
    ) -> ScdeployResult<((), String)> {
        let vnet_key = &options.outputs.vnet_name;
        let declared = consortium_outputs
            .get_str(vnet_key)
            .is_some_and(|s| !s.is_empty());
        let listed = if declared {
            Vec::new()
        } else {
            self.platform
                .list_virtual_networks(&options.resource_group.name)?
        };
        let vnet = resolve_vnet_name(consortium_outputs, vnet_key, &listed);

        let empty = ParameterFile::empty();
        let source = consortium_params.unwrap_or(&empty);
        let path = &options.supplychain_parameters;
        let (before, after, changed) = self.parameter_store.update(path, |target| {
            rewrite_parameters(
                source,
                target,
                password,
                vnet.as_deref(),
                &options.parameter_keys,
            )
        })?;

        let old = before.to_json_pretty();
        let new = after.to_json_pretty();
        let diff = similar::TextDiff::from_lines(old.as_str(), new.as_str())
            .unified_diff()
            .header(
                &format!("a/{}", path.display()),
                &format!("b/{}", path.display()),
            )
            .to_string();

        p.emit(DeployEvent::ParametersRewritten {
            path: path.clone(),
            changed: changed.clone(),
            diff: p.redact(&diff),
        });

        let detail = if changed.is_empty() {
            format!("{} already up to date", path.display())
        } else {
            format!("updated {} in {}", changed.join(", "), path.display())
        };
        Ok(((), detail))
    }

    fn deploy_contract(
        &self,
        p: &mut Pipeline,
        options: &DeployOptions,
        rpc_endpoint: &str,
        password: &Secret,
    ) -> ScdeployResult<((String, String), String)> {
        let run = self.contract_deployer.deploy(&ContractRequest {
            contract_name: &options.contract_name,
            rpc_endpoint,
            password,
        })?;
        p.emit(DeployEvent::ContractOutput {
            output: p.redact(&run.output),
        });

        let parsed = parse_contract_output(&run.output, run.structured.as_deref());
        p.result.contract = Some(parsed.output.clone());

        match parsed.output.outcome() {
            ContractOutcome::Deployed { account, contract } => {
                let detail = format!(
                    "{} at {} (account {})",
                    options.contract_name, contract, account
                );
                Ok(((account, contract), detail))
            }
            ContractOutcome::Failed(reason) => {
                let mut message = parsed.diagnostic.unwrap_or(reason);
                if !run.succeeded() {
                    match run.exit_code {
                        Some(code) => message.push_str(&format!(" (exit code {})", code)),
                        None => message.push_str(" (terminated by signal)"),
                    }
                }
                Err(ScdeployError::ContractFailed { message })
            }
        }
    }

    fn patch_settings(
        &self,
        p: &Pipeline,
        options: &DeployOptions,
        app: &str,
        overrides: &AppSettings,
    ) -> ScdeployResult<((), String)> {
        let target = AppTarget::new(&options.resource_group.name, app, &options.slot);
        let current = self.platform.get_app_settings(&target)?;
        let merged = current.merged_with(overrides);
        self.platform.set_app_settings(&target, &merged)?;

        let keys: Vec<String> = overrides.keys().map(str::to_string).collect();
        p.emit(DeployEvent::SettingsPatched {
            app: app.to_string(),
            slot: options.slot.clone(),
            keys: keys.clone(),
            total: merged.len(),
        });
        let detail = format!("{}: {} keys set, {} total", app, keys.len(), merged.len());
        Ok(((), detail))
    }
}

/// A fatal step failed; the error is already in the result.
struct Stop;

/// Run state shared by the steps: where events go, which strings must be
/// redacted, and the result being built.
struct Pipeline {
    events: Arc<dyn DeployEventSink>,
    secrets: Vec<Secret>,
    result: DeployResult,
}

impl Pipeline {
    fn new(events: Arc<dyn DeployEventSink>) -> Self {
        Self {
            events,
            secrets: Vec::new(),
            result: DeployResult::new(),
        }
    }

    fn emit(&self, event: DeployEvent) {
        self.events.on_event(event);
    }

    fn redact(&self, text: &str) -> String {
        self.secrets
            .iter()
            .fold(text.to_string(), |acc, secret| secret.redact(&acc))
    }

    /// Run one step and record how it ended. `Ok(None)` means a
    /// recoverable failure; `Err(Stop)` a fatal one.
    fn run<T>(
        &mut self,
        step: Step,
        work: impl FnOnce(&mut Self) -> ScdeployResult<(T, String)>,
    ) -> Result<Option<T>, Stop> {
        self.emit(DeployEvent::StepStarted { step });

        match work(self) {
            Ok((value, detail)) => {
                let detail = self.redact(&detail);
                self.emit(DeployEvent::StepCompleted {
                    step,
                    detail: detail.clone(),
                });
                self.push(step, StepStatus::Completed { detail });
                Ok(Some(value))
            }
            Err(err) => {
                let fatal = step.policy() == StepPolicy::Fatal;
                let error = self.redact(&err.to_string());
                self.emit(DeployEvent::StepFailed {
                    step,
                    error: error.clone(),
                    fatal,
                });
                self.push(step, StepStatus::Failed { error, fatal });
                if fatal {
                    self.result.error = Some(err);
                    Err(Stop)
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn skip(&mut self, step: Step, reason: impl Into<String>) {
        let reason = reason.into();
        self.emit(DeployEvent::StepSkipped {
            step,
            reason: reason.clone(),
        });
        self.push(step, StepStatus::Skipped { reason });
    }

    /// Stop before any step ran
    fn abort(&mut self, err: ScdeployError) -> Stop {
        self.result.error = Some(err);
        Stop
    }

    fn push(&mut self, step: Step, status: StepStatus) {
        self.result.steps.push(StepRecord { step, status });
    }

    fn finish(mut self) -> DeployResult {
        let stopped_at = self.result.steps.iter().find_map(|r| match r.status {
            StepStatus::Failed { fatal: true, .. } => Some(r.step),
            _ => None,
        });
        let reason = match stopped_at {
            Some(step) => format!("run stopped after {} failed", step.id()),
            None => "run stopped before the first step".to_string(),
        };
        for step in Step::ALL {
            if self.result.record(step).is_none() {
                self.skip(step, reason.clone());
            }
        }

        self.emit(DeployEvent::Completed {
            status: self.result.status(),
            completed_count: self.result.completed_count(),
            skipped_count: self.result.skipped_count(),
            failed_count: self.result.failed_count(),
        });
        self.result
    }
}

/// A fatal step that returned is guaranteed to have produced its value.
fn required<T>(value: Option<T>) -> Result<T, Stop> {
    value.ok_or(Stop)
}

fn required_output(
    outputs: &DeploymentOutputs,
    name: &str,
    deployment: &str,
) -> ScdeployResult<String> {
    outputs
        .get_str(name)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ScdeployError::MissingOutput {
            deployment: deployment.to_string(),
            name: name.to_string(),
        })
}

fn failed(step: Step) -> String {
    format!("{} failed", step.id())
}

fn storage_connection_string(account: &str, key: &Secret) -> String {
    format!(
        "DefaultEndpointsProtocol=https;AccountName={};AccountKey={};EndpointSuffix={}",
        account,
        key.expose(),
        STORAGE_ENDPOINT_SUFFIX
    )
}
