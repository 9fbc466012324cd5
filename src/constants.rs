// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The hello-world pod created and later deleted by the walkthrough
pub mod hello_world {
    pub const POD_NAME: &str = "hello-world";
    pub const CONTAINER_NAME: &str = "hello-world";
    pub const COMMAND: &str = "bin/sh";
    pub const SCRIPT: &str = "while true; do echo hello world! `date`; sleep 10; done";
}

/// Defaults used when the corresponding environment variable is unset
pub mod defaults {
    pub const NAMESPACE: &str = "hello-walkthrough";
    pub const LABEL_SELECTOR: &str = "k8s-app=kube-dns";
    pub const IMAGE: &str = "docker.io/busybox:latest";
    pub const PAUSE_SECS: u64 = 30;
}

/// Environment variable names read by `Config::from_env`
pub mod env {
    pub const KUBECONFIG: &str = "WALKTHROUGH_KUBECONFIG";
    pub const NAMESPACE: &str = "WALKTHROUGH_NAMESPACE";
    pub const LABEL_SELECTOR: &str = "WALKTHROUGH_LABEL_SELECTOR";
    pub const IMAGE: &str = "WALKTHROUGH_IMAGE";
    pub const PAUSE_SECS: &str = "WALKTHROUGH_PAUSE_SECS";
}
