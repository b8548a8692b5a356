use crate::{
    game_paths::InstallationLayout,
    identity::offline_uuid,
    launch::{classpath::classpath, macros::replace, rules::applicable_values, LaunchCommand, LaunchRequest},
    platform::Platform,
    repository::{descriptor::ReleaseDescriptor, java_runner::JavaRunner},
    resolver::ResolvedArtifact,
    utils::path_to_string,
    KILN_NAME, KILN_VERSION,
};

const LIBRARY_PATH_FLAG: &str = "-Djava.library.path=";
const START_ON_FIRST_THREAD: &str = "-XstartOnFirstThread";

/// Points every account service at an unroutable address.
const ISOLATION_FLAGS: [&str; 4] = [
    "-Dminecraft.api.auth.host=http://0.0.0.0",
    "-Dminecraft.api.account.host=http://0.0.0.0",
    "-Dminecraft.api.session.host=http://0.0.0.0",
    "-Dminecraft.api.services.host=http://0.0.0.0",
];

/// Turns a descriptor and the installed artifacts into a process command line.
#[derive(Debug, Clone, Copy)]
pub struct CommandSynthesizer<'a> {
    layout: &'a InstallationLayout,
    platform: Platform,
    java: &'a JavaRunner,
}

impl<'a> CommandSynthesizer<'a> {
    pub fn new(layout: &'a InstallationLayout, platform: Platform, java: &'a JavaRunner) -> Self {
        Self { layout, platform, java }
    }

    /// Builds the command line. `installed` must only contain artifacts that
    /// exist on disk; native ones are ignored.
    pub fn build(&self, descriptor: &ReleaseDescriptor, installed: &[ResolvedArtifact], request: &LaunchRequest) -> LaunchCommand {
        let mut tokens = vec![self.java.get_string(), format!("-Xmx{}G", request.memory_budget_gib)];

        tokens.extend(self.template_flags(descriptor, request));
        if !tokens.iter().any(|token| token.starts_with(LIBRARY_PATH_FLAG)) {
            tokens.push(format!("{LIBRARY_PATH_FLAG}{}", path_to_string(&request.natives_dir)));
        }

        tokens.extend(ISOLATION_FLAGS.map(String::from));

        if self.platform == Platform::Osx && !tokens.iter().any(|token| token == START_ON_FIRST_THREAD) {
            tokens.push(START_ON_FIRST_THREAD.to_owned());
        }

        tokens.push("-cp".to_owned());
        tokens.push(classpath(self.layout, &request.release_id, installed, self.platform));

        tokens.push(descriptor.main_class.clone());

        tokens.extend(self.game_arguments(descriptor, request));

        LaunchCommand::new(tokens)
    }

    fn template_flags(&self, descriptor: &ReleaseDescriptor, request: &LaunchRequest) -> Vec<String> {
        let natives_directory = path_to_string(&request.natives_dir);

        applicable_values(&descriptor.jvm_template, self.platform)
            .filter(|token| token.starts_with('-') || token.starts_with('$'))
            .map(|token| {
                replace!(token,
                    "${natives_directory}" => &natives_directory,
                    "${launcher_name}" => KILN_NAME,
                    "${launcher_version}" => KILN_VERSION,
                    "${classpath}" => ""
                )
            })
            .filter(|token| !token.is_empty() && token != "-cp" && !token.contains("${"))
            .collect()
    }

    fn game_arguments(&self, descriptor: &ReleaseDescriptor, request: &LaunchRequest) -> Vec<String> {
        let name = request.display_name.get();

        [
            "--username",
            name,
            "--version",
            request.release_id.as_str(),
            "--gameDir",
            path_to_string(&self.layout.root).as_str(),
            "--assetsDir",
            path_to_string(&self.layout.assets).as_str(),
            "--assetIndex",
            descriptor.asset_index_id.as_str(),
            "--uuid",
            offline_uuid(name).as_str(),
            "--accessToken",
            "0",
            "--userType",
            "legacy",
        ]
        .map(String::from)
        .to_vec()
    }
}
